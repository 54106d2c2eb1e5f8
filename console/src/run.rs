use std::path::PathBuf;

use clap::Args;
use doco::prelude::*;
use log::info;

use crate::aggregate::print_count_summary;
use crate::phase::print_phasing_summary;
use crate::utils::{
    create_output,
    init_spinner,
    open_input,
    write_report,
    PhaseInputs,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct RunArgs {
    #[clap(flatten)]
    pub inputs: PhaseInputs,
    #[arg(
        short = 'n',
        long,
        required = true,
        help = "Tab-separated transcript count table."
    )]
    pub counts: PathBuf,
    #[arg(
        long,
        help = "Transcript id column of the count table. Overrides the configuration."
    )]
    pub id_column: Option<String>,
    #[arg(
        short = 'd',
        long,
        required = true,
        help = "Path for the phasing dictionary."
    )]
    pub dictionary: PathBuf,
    #[arg(
        short = 'o',
        long,
        required = true,
        help = "Path for the DoCo count table."
    )]
    pub output: PathBuf,
    #[arg(short = 'r', long, help = "Path for a JSON run report.")]
    pub report: Option<PathBuf>,
}

impl RunArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let mut config = self.inputs.load_config()?;
        if let Some(id_column) = &self.id_column {
            config = config.with_count_id_column(id_column.clone());
        }
        let annotation = self.inputs.load_annotation(&config)?;
        let mappings = self.inputs.load_mappings(&config)?;
        let counts = CountMatrix::from_tsv(open_input(&self.counts)?, &config.count_id_column)?;

        let spinner = init_spinner("Phasing domains and aggregating counts...")?;
        let (outcome, doco_counts) =
            DocoPipeline::new(config).run(mappings, &annotation, &counts)?;
        spinner.finish_and_clear();

        outcome
            .dictionary
            .write_tsv(create_output(&self.dictionary)?)?;
        info!("Wrote phasing dictionary to {}", self.dictionary.display());
        doco_counts.write_tsv(create_output(&self.output)?)?;
        info!("Wrote DoCo counts to {}", self.output.display());

        if let Some(path) = &self.report {
            write_report(path, &outcome.report)?;
        }
        print_phasing_summary(&outcome.report, utils.verbose);
        print_count_summary(&counts, &doco_counts, utils.verbose);
        Ok(())
    }
}
