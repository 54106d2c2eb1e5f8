use std::path::PathBuf;

use clap::Args;
use console::style;
use doco::prelude::*;
use log::info;

use crate::utils::{
    create_output,
    init_spinner,
    open_input,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct AggregateArgs {
    #[arg(
        short = 'd',
        long,
        required = true,
        help = "Phasing dictionary produced by `phase`."
    )]
    pub dictionary: PathBuf,
    #[arg(
        short = 'n',
        long,
        required = true,
        help = "Tab-separated transcript count table."
    )]
    pub counts: PathBuf,
    #[arg(
        short = 'o',
        long,
        required = true,
        help = "Path for the DoCo count table."
    )]
    pub output: PathBuf,
    #[arg(
        long,
        default_value = "Transcript",
        help = "Transcript id column of the count table."
    )]
    pub id_column: String,
}

impl AggregateArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let dictionary = PhasingDictionary::from_tsv(open_input(&self.dictionary)?)?;
        let counts = CountMatrix::from_tsv(open_input(&self.counts)?, &self.id_column)?;

        let spinner = init_spinner("Aggregating counts...")?;
        let doco_counts = DocoPipeline::default().aggregate(&counts, &dictionary)?;
        spinner.finish_and_clear();

        doco_counts.write_tsv(create_output(&self.output)?)?;
        info!("Wrote DoCo counts to {}", self.output.display());

        print_count_summary(&counts, &doco_counts, utils.verbose);
        Ok(())
    }
}

pub(crate) fn print_count_summary(
    counts: &CountMatrix,
    doco_counts: &DocoCounts,
    verbose: bool,
) {
    eprintln!(
        "{} {} transcripts summed into {} DoCos, {} unmatched",
        style("Counts:").bold(),
        counts.n_transcripts(),
        style(doco_counts.n_docos()).green(),
        style(doco_counts.unmatched()).yellow()
    );
    if verbose {
        eprintln!(
            "{} {}",
            style("Samples:").bold(),
            counts.sample_columns().join(", ")
        );
    }
}
