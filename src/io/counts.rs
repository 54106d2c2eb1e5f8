//! Transcript-level count matrices.

use anyhow::Context;
use itertools::Itertools;
use log::debug;
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;

use super::table::{
    read_tsv,
    string_column,
};
use crate::data_structs::typedef::DOCO_COL;

/// Transcript × sample count table: one string id column plus numeric sample
/// columns without missing values.
#[derive(Debug, Clone)]
pub struct CountMatrix {
    data:      DataFrame,
    id_column: String,
}

impl CountMatrix {
    /// Validates and wraps a count frame.
    ///
    /// A frame without rows has its non-numeric sample columns cast to
    /// `Int64`, since no types can be inferred from a bare header.
    ///
    /// Fails if the id column is absent or not a string column, if the id
    /// column has missing values, if any other column is non-numeric or has
    /// missing values, or if a sample column is named `DoCo`.
    pub fn try_new(
        mut data: DataFrame,
        id_column: &str,
    ) -> anyhow::Result<Self> {
        if data.height() == 0 {
            let untyped = data
                .get_columns()
                .iter()
                .filter(|c| c.name().as_str() != id_column && !c.dtype().is_numeric())
                .map(|c| c.name().clone())
                .collect_vec();
            for name in untyped {
                let cast = data.column(&name)?.cast(&DataType::Int64)?;
                data.with_column(cast)?;
            }
        }

        let ids = string_column(&data, "count", id_column)?;
        anyhow::ensure!(
            ids.null_count() == 0,
            "Schema error: transcript id column '{}' has {} missing values",
            id_column,
            ids.null_count()
        );

        for column in data.get_columns() {
            let name = column.name().as_str();
            if name == id_column {
                continue;
            }
            anyhow::ensure!(
                name != DOCO_COL,
                "Schema error: count table sample column can not be named '{}'",
                DOCO_COL
            );
            anyhow::ensure!(
                column.dtype().is_numeric(),
                "Type error: sample column '{}' must be numeric, found {}",
                name,
                column.dtype()
            );
            anyhow::ensure!(
                column.null_count() == 0,
                "Type error: sample column '{}' has {} missing values",
                name,
                column.null_count()
            );
        }

        debug!(
            "Count matrix: {} transcripts x {} samples",
            data.height(),
            data.width() - 1
        );
        Ok(Self {
            data,
            id_column: id_column.to_string(),
        })
    }

    /// Reads a tab-separated count table. The id column is read as strings;
    /// sample column types are inferred from the whole file.
    pub fn from_tsv<R: MmapBytesReader>(
        reader: R,
        id_column: &str,
    ) -> anyhow::Result<Self> {
        let data = read_tsv(reader, true, &[id_column]).context("Failed to read count table")?;
        Self::try_new(data, id_column)
    }

    pub fn data(&self) -> &DataFrame { &self.data }

    pub fn id_column(&self) -> &str { &self.id_column }

    pub fn ids(&self) -> anyhow::Result<&StringChunked> {
        string_column(&self.data, "count", &self.id_column)
    }

    /// Sample column names, in table order.
    pub fn sample_columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .filter(|name| name.as_str() != self.id_column)
            .map(|name| name.to_string())
            .collect_vec()
    }

    pub fn n_transcripts(&self) -> usize { self.data.height() }
}
