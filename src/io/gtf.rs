//! GTF import of transcript structures.

use std::io::Read;

use anyhow::{
    anyhow,
    Context,
};
use bio::io::gff::{
    GffType,
    Reader,
    Record,
};
use indexmap::IndexMap;
use log::{
    debug,
    info,
};

use crate::data_structs::{
    Span,
    Strand,
    TranscriptModel,
};

const EXON_FEATURE: &str = "exon";
const TRANSCRIPT_FEATURE: &str = "transcript";

fn attribute<'a>(
    record: &'a Record,
    key: &str,
) -> anyhow::Result<&'a str> {
    record
        .attributes()
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| {
            anyhow!(
                "{} record at {}:{} has no '{}' attribute",
                record.feature_type(),
                record.seqname(),
                record.start(),
                key
            )
        })
}

fn new_model(
    record: &Record,
    transcript: &str,
    gene: &str,
) -> TranscriptModel {
    TranscriptModel {
        transcript: transcript.to_string(),
        gene:       gene.to_string(),
        chrom:      record.seqname().to_string(),
        strand:     record
            .strand()
            .map(Strand::from)
            .unwrap_or_default(),
        exons:      Vec::new(),
    }
}

/// Reads `exon` (and `transcript`) records of a GTF file and groups exons by
/// `transcript_id`. GTF 1-based closed coordinates are converted to 0-based
/// half-open ones. Transcripts are returned in first-seen order with exons
/// sorted by start.
pub fn read_gtf_transcripts<R: Read>(reader: R) -> anyhow::Result<Vec<TranscriptModel>> {
    let mut reader = Reader::new(reader, GffType::GTF2);
    let mut models: IndexMap<String, TranscriptModel> = IndexMap::new();
    let mut n_exons = 0usize;

    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to parse GTF record {}", idx + 1))?;
        let feature = record.feature_type();
        if feature != EXON_FEATURE && feature != TRANSCRIPT_FEATURE {
            continue;
        }
        let transcript = attribute(&record, "transcript_id")?;
        let gene = attribute(&record, "gene_id")?;
        let model = models
            .entry(transcript.to_string())
            .or_insert_with(|| new_model(&record, transcript, gene));

        if feature == EXON_FEATURE {
            let start = record
                .start()
                .checked_sub(1)
                .ok_or_else(|| anyhow!("GTF exon of {} starts at 0", transcript))?;
            model
                .exons
                .push(Span::try_new(start, *record.end())?);
            n_exons += 1;
        }
    }

    let mut models = models.into_values().collect::<Vec<_>>();
    for model in models.iter_mut() {
        model.exons.sort();
    }
    debug!("Read {} GTF exons", n_exons);
    info!("Imported {} transcripts from GTF", models.len());
    Ok(models)
}
