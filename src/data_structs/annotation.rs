use std::io::Read;

use indexmap::IndexMap;
use log::{
    debug,
    warn,
};
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};

use super::coords::Exon;
use super::enums::Strand;
use super::typedef::{
    GENE_COL,
    TRANSCRIPT_COL,
};
use crate::io::table::{
    read_tsv,
    string_column,
};
use crate::with_field_fn;

/// Transcript structure as imported from a gene annotation (GTF).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptModel {
    pub transcript: String,
    pub gene:       String,
    pub chrom:      String,
    pub strand:     Strand,
    /// Exons sorted ascending by start.
    pub exons:      Vec<Exon>,
}

/// Column names of a transcript annotation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationColumns {
    pub transcript: String,
    pub gene:       String,
}

impl Default for AnnotationColumns {
    fn default() -> Self {
        Self {
            transcript: TRANSCRIPT_COL.to_string(),
            gene:       GENE_COL.to_string(),
        }
    }
}

impl AnnotationColumns {
    with_field_fn!(transcript, String);
    with_field_fn!(gene, String);
}

/// Universe of known transcripts and the genes they belong to, in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptAnnotation {
    transcripts: IndexMap<String, String>,
}

impl TranscriptAnnotation {
    pub fn new() -> Self { Self::default() }

    /// Inserts a transcript. The first gene seen for a transcript wins.
    pub fn insert<T: Into<String>, G: Into<String>>(
        &mut self,
        transcript: T,
        gene: G,
    ) {
        let transcript = transcript.into();
        let gene = gene.into();
        match self.transcripts.get(&transcript) {
            Some(existing) if existing != &gene => {
                warn!(
                    "Transcript {} is annotated with genes {} and {}; keeping {}",
                    transcript, existing, gene, existing
                );
            },
            Some(_) => {},
            None => {
                self.transcripts.insert(transcript, gene);
            },
        }
    }

    pub fn gene(
        &self,
        transcript: &str,
    ) -> Option<&str> {
        self.transcripts
            .get(transcript)
            .map(String::as_str)
    }

    pub fn contains(
        &self,
        transcript: &str,
    ) -> bool {
        self.transcripts.contains_key(transcript)
    }

    pub fn len(&self) -> usize { self.transcripts.len() }

    pub fn is_empty(&self) -> bool { self.transcripts.is_empty() }

    /// Iterates over `(transcript, gene)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.transcripts
            .iter()
            .map(|(t, g)| (t.as_str(), g.as_str()))
    }

    pub fn from_models<'a, I>(models: I) -> Self
    where
        I: IntoIterator<Item = &'a TranscriptModel>, {
        models
            .into_iter()
            .map(|m| (m.transcript.clone(), m.gene.clone()))
            .collect()
    }

    /// Builds the annotation from a table with a transcript and a gene
    /// column. Rows with a missing transcript or gene are a schema error.
    pub fn from_frame(
        df: &DataFrame,
        columns: &AnnotationColumns,
    ) -> anyhow::Result<Self> {
        let transcripts = string_column(df, "transcript annotation", &columns.transcript)?;
        let genes = string_column(df, "transcript annotation", &columns.gene)?;

        let mut annotation = Self::new();
        for (row, (transcript, gene)) in transcripts
            .into_iter()
            .zip(genes.into_iter())
            .enumerate()
        {
            match (transcript, gene) {
                (Some(t), Some(g)) => annotation.insert(t, g),
                _ => {
                    anyhow::bail!(
                        "Transcript annotation row {} is missing a transcript or gene id",
                        row + 1
                    )
                },
            }
        }
        debug!("Read {} annotated transcripts", annotation.len());
        Ok(annotation)
    }

    pub fn from_tsv<R: MmapBytesReader>(
        reader: R,
        columns: &AnnotationColumns,
    ) -> anyhow::Result<Self> {
        let df = read_tsv(reader, false, &[])?;
        Self::from_frame(&df, columns)
    }

    pub fn from_gtf<R: Read>(reader: R) -> anyhow::Result<Self> {
        let models = crate::io::gtf::read_gtf_transcripts(reader)?;
        Ok(Self::from_models(&models))
    }
}

impl<T: Into<String>, G: Into<String>> FromIterator<(T, G)> for TranscriptAnnotation {
    fn from_iter<I: IntoIterator<Item = (T, G)>>(iter: I) -> Self {
        let mut annotation = Self::new();
        for (transcript, gene) in iter {
            annotation.insert(transcript, gene);
        }
        annotation
    }
}
