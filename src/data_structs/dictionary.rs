use std::io::Write;

use anyhow::Context;
use itertools::{
    izip,
    Itertools,
};
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};

use super::typedef::{
    DOCO_COL,
    GENE_COL,
    TRANSCRIPT_COL,
};
use crate::io::table::{
    read_tsv,
    string_column,
    write_tsv,
};

/// Row of the phasing dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhasingEntry {
    pub transcript: String,
    pub doco:       String,
    pub gene:       String,
}

impl PhasingEntry {
    pub fn new<T, D, G>(
        transcript: T,
        doco: D,
        gene: G,
    ) -> Self
    where
        T: Into<String>,
        D: Into<String>,
        G: Into<String>, {
        Self {
            transcript: transcript.into(),
            doco:       doco.into(),
            gene:       gene.into(),
        }
    }
}

/// Gene ↔ DoCo ↔ Transcript table with one entry per transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhasingDictionary {
    entries: Vec<PhasingEntry>,
}

impl PhasingDictionary {
    /// Wraps entries. Transcript ids must be unique.
    pub fn try_new(entries: Vec<PhasingEntry>) -> anyhow::Result<Self> {
        if let Some(duplicate) = entries
            .iter()
            .map(|e| e.transcript.as_str())
            .duplicates()
            .next()
        {
            anyhow::bail!("Transcript {} occurs more than once in the phasing dictionary", duplicate);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PhasingEntry] { &self.entries }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(
        &self,
        transcript: &str,
    ) -> Option<&PhasingEntry> {
        self.entries
            .iter()
            .find(|e| e.transcript == transcript)
    }

    /// Number of distinct DoCo strings.
    pub fn n_docos(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.doco.as_str())
            .unique()
            .count()
    }

    /// Converts to a `Transcript`, `DoCo`, `Gene` data frame.
    pub fn to_frame(&self) -> anyhow::Result<DataFrame> {
        let (transcripts, docos, genes): (Vec<&str>, Vec<&str>, Vec<&str>) = self
            .entries
            .iter()
            .map(|e| (e.transcript.as_str(), e.doco.as_str(), e.gene.as_str()))
            .multiunzip();
        let df = DataFrame::new(vec![
            Column::new(TRANSCRIPT_COL.into(), transcripts),
            Column::new(DOCO_COL.into(), docos),
            Column::new(GENE_COL.into(), genes),
        ])?;
        Ok(df)
    }

    /// Reads a dictionary frame. `Transcript`, `DoCo` and `Gene` columns are
    /// required; extra columns are ignored.
    pub fn try_from_frame(df: &DataFrame) -> anyhow::Result<Self> {
        let transcripts = string_column(df, "phasing dictionary", TRANSCRIPT_COL)?;
        let docos = string_column(df, "phasing dictionary", DOCO_COL)?;
        let genes = string_column(df, "phasing dictionary", GENE_COL)?;

        let entries = izip!(transcripts, docos, genes)
            .enumerate()
            .map(|(row, (transcript, doco, gene))| {
                match (transcript, doco, gene) {
                    (Some(t), Some(d), Some(g)) => Ok(PhasingEntry::new(t, d, g)),
                    _ => {
                        Err(anyhow::anyhow!(
                            "Phasing dictionary row {} has missing values",
                            row + 1
                        ))
                    },
                }
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Self::try_new(entries)
    }

    pub fn from_tsv<R: MmapBytesReader>(reader: R) -> anyhow::Result<Self> {
        let df = read_tsv(reader, false, &[]).context("Failed to read phasing dictionary")?;
        Self::try_from_frame(&df)
    }

    pub fn write_tsv<W: Write>(
        &self,
        writer: W,
    ) -> anyhow::Result<()> {
        let mut df = self.to_frame()?;
        write_tsv(&mut df, writer)
    }
}

impl IntoIterator for PhasingDictionary {
    type IntoIter = std::vec::IntoIter<PhasingEntry>;
    type Item = PhasingEntry;

    fn into_iter(self) -> Self::IntoIter { self.entries.into_iter() }
}
