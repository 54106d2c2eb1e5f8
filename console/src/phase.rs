use std::path::PathBuf;

use clap::Args;
use console::style;
use doco::prelude::*;
use log::info;

use crate::utils::{
    create_output,
    init_spinner,
    write_report,
    PhaseInputs,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct PhaseArgs {
    #[clap(flatten)]
    pub inputs: PhaseInputs,
    #[arg(
        short = 'o',
        long,
        required = true,
        help = "Path for the phasing dictionary (Transcript, DoCo, Gene)."
    )]
    pub output: PathBuf,
    #[arg(short = 'r', long, help = "Path for a JSON run report.")]
    pub report: Option<PathBuf>,
}

impl PhaseArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let config = self.inputs.load_config()?;
        let annotation = self.inputs.load_annotation(&config)?;
        let mappings = self.inputs.load_mappings(&config)?;

        let spinner = init_spinner("Phasing domains...")?;
        let outcome = DocoPipeline::new(config).phase(mappings, &annotation)?;
        spinner.finish_and_clear();

        outcome
            .dictionary
            .write_tsv(create_output(&self.output)?)?;
        info!("Wrote phasing dictionary to {}", self.output.display());

        if let Some(path) = &self.report {
            write_report(path, &outcome.report)?;
        }
        print_phasing_summary(&outcome.report, utils.verbose);
        Ok(())
    }
}

pub(crate) fn print_phasing_summary(
    report: &PipelineReport,
    verbose: bool,
) {
    eprintln!(
        "{} {} of {} mappings kept ({} rejected, {} duplicates)",
        style("Phasing:").bold(),
        style(report.kept_rows).green(),
        report.mapping_rows,
        style(report.rejected_rows).yellow(),
        report.duplicate_rows
    );
    eprintln!(
        "{} {} transcripts, {} without domains, {} distinct DoCos",
        style("Dictionary:").bold(),
        report.annotated_transcripts,
        report.domainless_transcripts,
        style(report.distinct_docos).green()
    );
    if verbose {
        eprintln!(
            "{} {} transcripts carry at least one validated domain",
            style("Phased:").bold(),
            report.phased_transcripts
        );
    }
}
