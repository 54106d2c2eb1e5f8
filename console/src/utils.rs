use std::fs::File;
use std::path::{
    Path,
    PathBuf,
};
use std::time::Duration;

use anyhow::{
    bail,
    Context,
};
use clap::Args;
use doco::prelude::*;
use doco::utils::NUM_THREADS_ENV;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use log::LevelFilter;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        long,
        short = 't',
        help = "Number of worker threads. Defaults to all available cores."
    )]
    pub threads: Option<usize>,
    #[arg(long, short = 'v', default_value_t = false, help = "Verbose output.")]
    pub verbose: bool,
}

impl UtilsArgs {
    /// Configures the worker pool and the logger. Must run before any library
    /// call touches the thread pool.
    pub fn setup(&self) -> anyhow::Result<()> {
        if let Some(threads) = self.threads {
            std::env::set_var(NUM_THREADS_ENV, threads.to_string());
        }
        let level = if self.verbose {
            LevelFilter::Debug
        }
        else {
            LevelFilter::Info
        };
        pretty_env_logger::formatted_builder()
            .filter_level(level)
            .parse_default_env()
            .try_init()?;
        Ok(())
    }
}

/// Options shared by every command that phases domains.
#[derive(Args, Debug, Clone)]
pub(crate) struct PhaseInputs {
    #[arg(
        short = 'm',
        long,
        required = true,
        help = "Tab-separated transcript/domain overlap table."
    )]
    pub mappings: PathBuf,
    #[arg(
        short = 'a',
        long,
        conflicts_with = "gtf",
        required_unless_present = "gtf",
        help = "Tab-separated transcript annotation with transcript and gene columns."
    )]
    pub annotation: Option<PathBuf>,
    #[arg(long, help = "GTF file to take the transcript annotation from.")]
    pub gtf: Option<PathBuf>,
    #[arg(
        short = 'u',
        long,
        default_value_t = false,
        help = "Count each domain once per transcript."
    )]
    pub unique_domain: bool,
    #[arg(
        long,
        default_value_t = false,
        help = "Write domain::chrom:start-end(strand) tokens instead of domain ids."
    )]
    pub coordinates: bool,
    #[arg(
        short = 'c',
        long,
        help = "JSON configuration. Command line flags override its values."
    )]
    pub config: Option<PathBuf>,
}

impl PhaseInputs {
    pub fn load_config(&self) -> anyhow::Result<DocoConfig> {
        let mut config = match &self.config {
            Some(path) => DocoConfig::from_json_file(path)?,
            None => DocoConfig::default(),
        };
        if self.unique_domain {
            config = config.with_unique_domain(true);
        }
        if self.coordinates {
            config = config.with_coordinates(true);
        }
        Ok(config)
    }

    pub fn load_mappings(
        &self,
        config: &DocoConfig,
    ) -> anyhow::Result<Vec<DomainMapping>> {
        MappingReader::new(config.columns.clone()).read(open_input(&self.mappings)?)
    }

    pub fn load_annotation(
        &self,
        config: &DocoConfig,
    ) -> anyhow::Result<TranscriptAnnotation> {
        match (&self.annotation, &self.gtf) {
            (Some(path), _) => {
                TranscriptAnnotation::from_tsv(open_input(path)?, &config.annotation_columns)
            },
            (None, Some(path)) => TranscriptAnnotation::from_gtf(open_input(path)?),
            (None, None) => bail!("Either --annotation or --gtf must be given"),
        }
    }
}

pub(crate) fn open_input(path: &Path) -> anyhow::Result<File> {
    if !path.is_file() {
        bail!("Input {} does not exist or is not a file", path.display());
    }
    File::open(path).with_context(|| format!("Failed to open {}", path.display()))
}

pub(crate) fn create_output(path: &Path) -> anyhow::Result<File> {
    File::create(path).with_context(|| format!("Failed to create {}", path.display()))
}

pub(crate) fn write_report(
    path: &Path,
    report: &PipelineReport,
) -> anyhow::Result<()> {
    let file = create_output(path)?;
    serde_json::to_writer_pretty(file, report)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    Ok(())
}

pub(crate) fn init_spinner(message: &'static str) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}
