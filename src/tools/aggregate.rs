//! Aggregation of transcript-level counts into DoCo-level counts.

use std::io::Write;

use hashbrown::HashMap;
use itertools::Itertools;
use log::{
    info,
    warn,
};
use polars::prelude::*;

use crate::data_structs::doco::UNMATCHED_DOCO;
use crate::data_structs::typedef::DOCO_COL;
use crate::data_structs::PhasingDictionary;
use crate::io::counts::CountMatrix;
use crate::io::table::{
    string_column,
    write_tsv,
};

/// Strips trailing version suffixes (`.<digits>`) from a transcript id.
///
/// Every trailing suffix is removed (`ENST01.2.1` → `ENST01`), so applying
/// the function twice gives the same id as applying it once. An id that
/// would become empty is left as is.
pub fn normalize_transcript_id(id: &str) -> &str {
    let mut current = id;
    while let Some((head, version)) = current.rsplit_once('.') {
        if head.is_empty()
            || version.is_empty()
            || !version.bytes().all(|b| b.is_ascii_digit())
        {
            break;
        }
        current = head;
    }
    current
}

/// DoCo-level count table.
#[derive(Debug, Clone)]
pub struct DocoCounts {
    data:      DataFrame,
    /// Number of count rows routed to the `";;;"` bucket.
    unmatched: usize,
}

impl DocoCounts {
    pub fn data(&self) -> &DataFrame { &self.data }

    pub fn into_frame(self) -> DataFrame { self.data }

    pub fn unmatched(&self) -> usize { self.unmatched }

    pub fn n_docos(&self) -> usize { self.data.height() }

    /// DoCo strings, in row order.
    pub fn docos(&self) -> anyhow::Result<Vec<String>> {
        Ok(string_column(&self.data, "DoCo count", DOCO_COL)?
            .into_iter()
            .map(|d| d.unwrap_or_default().to_string())
            .collect())
    }

    /// Summed value of `sample` for `doco`, as `f64`.
    pub fn value(
        &self,
        doco: &str,
        sample: &str,
    ) -> anyhow::Result<Option<f64>> {
        let row = string_column(&self.data, "DoCo count", DOCO_COL)?
            .into_iter()
            .position(|d| d == Some(doco));
        match row {
            None => Ok(None),
            Some(idx) => {
                let value = self.data.column(sample)?.get(idx)?;
                Ok(value.extract::<f64>())
            },
        }
    }

    pub fn write_tsv<W: Write>(
        &self,
        writer: W,
    ) -> anyhow::Result<()> {
        let mut df = self.data.clone();
        write_tsv(&mut df, writer)
    }
}

/// Sums transcript counts per DoCo.
///
/// Transcript ids of both tables are version-normalized before matching.
/// Count rows without a dictionary entry are summed into the `";;;"`
/// bucket. Output rows are sorted by DoCo; columns are `DoCo` followed by
/// the sample columns in input order.
pub fn aggregate_counts(
    counts: &CountMatrix,
    dictionary: &PhasingDictionary,
) -> anyhow::Result<DocoCounts> {
    let mut stripped = 0usize;
    let mut collisions = 0usize;
    let mut lookup: HashMap<&str, &str> = HashMap::with_capacity(dictionary.len());
    for entry in dictionary.entries() {
        let key = normalize_transcript_id(&entry.transcript);
        if key.len() != entry.transcript.len() {
            stripped += 1;
        }
        if lookup.contains_key(key) {
            collisions += 1;
        }
        else {
            lookup.insert(key, entry.doco.as_str());
        }
    }
    if collisions > 0 {
        warn!(
            "{} dictionary transcripts share a version-normalized id with an earlier entry and were ignored",
            collisions
        );
    }

    let mut unmatched = 0usize;
    let docos = counts
        .ids()?
        .into_iter()
        .map(|id| {
            let id = id.unwrap_or_default();
            let key = normalize_transcript_id(id);
            if key.len() != id.len() {
                stripped += 1;
            }
            match lookup.get(key) {
                Some(doco) => *doco,
                None => {
                    unmatched += 1;
                    UNMATCHED_DOCO
                },
            }
        })
        .collect_vec();

    if stripped > 0 {
        warn!(
            "Stripped version suffixes from {} transcript ids before matching",
            stripped
        );
    }
    if unmatched > 0 {
        warn!(
            "{} of {} count rows have no phasing dictionary entry and were assigned to '{}'",
            unmatched,
            counts.n_transcripts(),
            UNMATCHED_DOCO
        );
    }

    let samples = counts.sample_columns();
    let mut frame = counts
        .data()
        .select(samples.iter().map(String::as_str))?;
    frame.with_column(Column::new(DOCO_COL.into(), docos))?;

    let data = frame
        .lazy()
        .group_by([col(DOCO_COL)])
        .agg(
            samples
                .iter()
                .map(|name| col(name.as_str()).sum())
                .collect_vec(),
        )
        .sort([DOCO_COL], SortMultipleOptions::default())
        .collect()?;

    info!(
        "Aggregated {} transcripts into {} DoCos across {} samples",
        counts.n_transcripts(),
        data.height(),
        samples.len()
    );
    Ok(DocoCounts { data, unmatched })
}
