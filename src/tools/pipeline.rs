use std::fs::File;
use std::path::Path;

use anyhow::Context;
use log::info;
use serde::{
    Deserialize,
    Serialize,
};

use super::aggregate::{
    aggregate_counts,
    DocoCounts,
};
use super::dictionary::build_dictionary;
use super::phase::{
    collapse_phased,
    phase_domains,
    PhasedMapping,
};
use super::validate::deduplicate_domains;
use crate::data_structs::doco::GENE_SEPARATOR;
use crate::data_structs::typedef::TRANSCRIPT_COL;
use crate::data_structs::{
    AnnotationColumns,
    DomainMapping,
    PhasingDictionary,
    TranscriptAnnotation,
};
use crate::io::counts::CountMatrix;
use crate::io::mapping::MappingColumns;
use crate::with_field_fn;

/// Settings of a DoCo run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocoConfig {
    /// Count a domain once per transcript even if it aligns several times.
    pub unique_domain:      bool,
    /// Emit `domain::chrom:start-end(strand)` tokens instead of bare ids.
    pub coordinates:        bool,
    pub columns:            MappingColumns,
    pub annotation_columns: AnnotationColumns,
    /// Transcript id column of count tables.
    pub count_id_column:    String,
}

impl Default for DocoConfig {
    fn default() -> Self {
        Self {
            unique_domain:      false,
            coordinates:        false,
            columns:            MappingColumns::default(),
            annotation_columns: AnnotationColumns::default(),
            count_id_column:    TRANSCRIPT_COL.to_string(),
        }
    }
}

impl DocoConfig {
    with_field_fn!(unique_domain, bool);
    with_field_fn!(coordinates, bool);
    with_field_fn!(columns, MappingColumns);
    with_field_fn!(annotation_columns, AnnotationColumns);
    with_field_fn!(count_id_column, String);

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open config {}", path.as_ref().display()))?;
        let config = serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse config {}", path.as_ref().display()))?;
        Ok(config)
    }
}

/// Row counts gathered along a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub mapping_rows:           usize,
    pub rejected_rows:          usize,
    pub duplicate_rows:         usize,
    pub kept_rows:              usize,
    pub phased_transcripts:     usize,
    pub annotated_transcripts:  usize,
    pub domainless_transcripts: usize,
    pub distinct_docos:         usize,
    pub unmatched_count_rows:   Option<usize>,
}

/// Result of [`DocoPipeline::phase`].
#[derive(Debug, Clone)]
pub struct PhasingOutcome {
    pub phased:     Vec<PhasedMapping>,
    pub dictionary: PhasingDictionary,
    pub report:     PipelineReport,
}

/// Runs validation, phasing, dictionary construction and count aggregation
/// with one configuration.
#[derive(Debug, Clone, Default)]
pub struct DocoPipeline {
    config: DocoConfig,
}

impl DocoPipeline {
    pub fn new(config: DocoConfig) -> Self { Self { config } }

    pub fn config(&self) -> &DocoConfig { &self.config }

    /// Validates mappings, phases domains and builds the dictionary over the
    /// annotated transcripts.
    pub fn phase(
        &self,
        mappings: Vec<DomainMapping>,
        annotation: &TranscriptAnnotation,
    ) -> anyhow::Result<PhasingOutcome> {
        let mapping_rows = mappings.len();
        let dedup = deduplicate_domains(mappings, self.config.unique_domain);
        let kept_rows = dedup.kept.len();

        let phased = phase_domains(dedup.kept, self.config.coordinates);
        let dictionary = build_dictionary(&phased, annotation)?;

        let domainless_transcripts = dictionary
            .entries()
            .iter()
            .filter(|e| e.doco.starts_with(GENE_SEPARATOR))
            .count();
        let phased_transcripts = collapse_phased(&phased).len();

        let report = PipelineReport {
            mapping_rows,
            rejected_rows: dedup.rejected,
            duplicate_rows: dedup.duplicates,
            kept_rows,
            phased_transcripts,
            annotated_transcripts: annotation.len(),
            domainless_transcripts,
            distinct_docos: dictionary.n_docos(),
            unmatched_count_rows: None,
        };
        info!(
            "Phasing finished: {} of {} mappings kept, {} DoCos",
            report.kept_rows, report.mapping_rows, report.distinct_docos
        );

        Ok(PhasingOutcome {
            phased,
            dictionary,
            report,
        })
    }

    /// Sums transcript counts per DoCo.
    pub fn aggregate(
        &self,
        counts: &CountMatrix,
        dictionary: &PhasingDictionary,
    ) -> anyhow::Result<DocoCounts> {
        aggregate_counts(counts, dictionary)
    }

    /// Both stages at once; the report gets the unmatched count rows.
    pub fn run(
        &self,
        mappings: Vec<DomainMapping>,
        annotation: &TranscriptAnnotation,
        counts: &CountMatrix,
    ) -> anyhow::Result<(PhasingOutcome, DocoCounts)> {
        let mut outcome = self.phase(mappings, annotation)?;
        let doco_counts = self.aggregate(counts, &outcome.dictionary)?;
        outcome.report.unmatched_count_rows = Some(doco_counts.unmatched());
        Ok((outcome, doco_counts))
    }
}
