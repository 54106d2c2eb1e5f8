//! Reader for transcript/domain overlap tables.
//!
//! The overlap engine reports one row per overlapping (transcript, domain)
//! pair, plus rows with an empty domain cell for transcripts that were
//! examined but had no overlap. Besides ids, every row carries the structure
//! of both features as comma-separated coordinate lists, either absolute
//! (genePred `exonStarts`/`exonEnds`) or relative to a base coordinate
//! (BED12 `chromStarts`/`blockSizes`). Column names are configurable through
//! [`MappingColumns`].

use std::str::FromStr;

use anyhow::{
    anyhow,
    bail,
    Context,
};
use log::info;
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};

use super::table::{
    read_tsv,
    require_columns,
    string_column,
};
use crate::data_structs::typedef::{
    PosType,
    GENE_COL,
    TRANSCRIPT_COL,
};
use crate::data_structs::{
    DomainMapping,
    Span,
    Strand,
};
use crate::tools::expand::{
    absolute_spans,
    expand_spans,
};
use crate::utils::non_empty_cell;
use crate::with_field_fn;

const TABLE: &str = "mapping";

/// How a feature's sub-intervals are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordLayout {
    /// Absolute start and end lists.
    #[default]
    Absolute,
    /// Offsets from a base coordinate and sizes.
    Relative,
}

/// Columns holding the sub-intervals (exons or blocks) of a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanColumns {
    pub layout: CoordLayout,
    /// Base coordinate column, used with [`CoordLayout::Relative`].
    pub base:   Option<String>,
    /// Absolute starts or relative offsets.
    pub starts: String,
    /// Absolute ends or sizes.
    pub ends:   String,
}

impl SpanColumns {
    pub fn absolute<S: Into<String>, E: Into<String>>(
        starts: S,
        ends: E,
    ) -> Self {
        Self {
            layout: CoordLayout::Absolute,
            base:   None,
            starts: starts.into(),
            ends:   ends.into(),
        }
    }

    pub fn relative<B, S, E>(
        base: B,
        starts: S,
        sizes: E,
    ) -> Self
    where
        B: Into<String>,
        S: Into<String>,
        E: Into<String>, {
        Self {
            layout: CoordLayout::Relative,
            base:   Some(base.into()),
            starts: starts.into(),
            ends:   sizes.into(),
        }
    }

    /// Checks that a base column is given exactly for the relative layout.
    pub fn validate(
        &self,
        feature: &str,
    ) -> anyhow::Result<()> {
        match (self.layout, self.base.as_ref()) {
            (CoordLayout::Relative, None) => {
                bail!("Schema error: relative {} columns need a base column", feature)
            },
            (CoordLayout::Absolute, Some(base)) => {
                bail!(
                    "Schema error: absolute {} columns take no base column, got '{}'",
                    feature,
                    base
                )
            },
            _ => Ok(()),
        }
    }

    fn names(&self) -> Vec<&str> {
        let mut names = vec![self.starts.as_str(), self.ends.as_str()];
        if let Some(base) = self.base.as_ref() {
            names.push(base.as_str());
        }
        names
    }

    fn parse(
        &self,
        base: Option<&str>,
        starts: Option<&str>,
        ends: Option<&str>,
    ) -> anyhow::Result<Vec<Span>> {
        let starts = starts.unwrap_or_default();
        let ends = ends.unwrap_or_default();
        match self.layout {
            CoordLayout::Absolute => absolute_spans(starts, ends),
            CoordLayout::Relative => {
                let base = parse_position(base, self.base.as_deref().unwrap_or_default())?;
                expand_spans(base, starts, ends)
            },
        }
    }
}

/// Column names of the overlap table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingColumns {
    pub transcript:   String,
    pub gene:         String,
    pub domain:       String,
    pub chrom:        String,
    pub strand:       String,
    pub domain_start: String,
    pub domain_end:   String,
    pub exons:        SpanColumns,
    pub blocks:       SpanColumns,
}

impl Default for MappingColumns {
    fn default() -> Self {
        Self {
            transcript:   TRANSCRIPT_COL.to_string(),
            gene:         GENE_COL.to_string(),
            domain:       "Domain".to_string(),
            chrom:        "chrom".to_string(),
            strand:       "strand".to_string(),
            domain_start: "domainStart".to_string(),
            domain_end:   "domainEnd".to_string(),
            exons:        SpanColumns::absolute("exonStarts", "exonEnds"),
            blocks:       SpanColumns::relative("domainStart", "chromStarts", "blockSizes"),
        }
    }
}

impl MappingColumns {
    with_field_fn!(transcript, String);
    with_field_fn!(gene, String);
    with_field_fn!(domain, String);
    with_field_fn!(chrom, String);
    with_field_fn!(strand, String);
    with_field_fn!(domain_start, String);
    with_field_fn!(domain_end, String);
    with_field_fn!(exons, SpanColumns);
    with_field_fn!(blocks, SpanColumns);

    /// Checks the exon and block layouts.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.exons.validate("exon")?;
        self.blocks.validate("block")
    }

    fn required(&self) -> Vec<&str> {
        let mut names = vec![
            self.transcript.as_str(),
            self.gene.as_str(),
            self.domain.as_str(),
            self.chrom.as_str(),
            self.strand.as_str(),
            self.domain_start.as_str(),
            self.domain_end.as_str(),
        ];
        names.extend(self.exons.names());
        names.extend(self.blocks.names());
        names
    }
}

fn parse_position(
    value: Option<&str>,
    column: &str,
) -> anyhow::Result<PosType> {
    let value = non_empty_cell(value).ok_or_else(|| anyhow!("Missing value in column '{}'", column))?;
    value
        .parse::<PosType>()
        .with_context(|| format!("Malformed coordinate '{}' in column '{}'", value, column))
}

/// Builds [`DomainMapping`]s from an overlap table.
#[derive(Debug, Clone, Default)]
pub struct MappingReader {
    columns: MappingColumns,
}

impl MappingReader {
    pub fn new(columns: MappingColumns) -> Self { Self { columns } }

    pub fn columns(&self) -> &MappingColumns { &self.columns }

    /// Reads a tab-separated overlap table.
    pub fn read<R: MmapBytesReader>(
        &self,
        reader: R,
    ) -> anyhow::Result<Vec<DomainMapping>> {
        let df = read_tsv(reader, false, &[]).context("Failed to read mapping table")?;
        self.from_frame(&df)
    }

    /// Converts an all-string overlap frame into mapping rows. Any malformed
    /// row fails the whole table.
    pub fn from_frame(
        &self,
        df: &DataFrame,
    ) -> anyhow::Result<Vec<DomainMapping>> {
        let c = &self.columns;
        c.validate()?;
        require_columns(df, TABLE, &c.required())?;

        let column = |name: &str| string_column(df, TABLE, name);
        let transcripts = column(&c.transcript)?;
        let genes = column(&c.gene)?;
        let domains = column(&c.domain)?;
        let chroms = column(&c.chrom)?;
        let strands = column(&c.strand)?;
        let domain_starts = column(&c.domain_start)?;
        let domain_ends = column(&c.domain_end)?;
        let exon_starts = column(&c.exons.starts)?;
        let exon_ends = column(&c.exons.ends)?;
        let exon_base = c
            .exons
            .base
            .as_deref()
            .map(column)
            .transpose()?;
        let block_starts = column(&c.blocks.starts)?;
        let block_ends = column(&c.blocks.ends)?;
        let block_base = c
            .blocks
            .base
            .as_deref()
            .map(column)
            .transpose()?;

        let mut rows = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let parse_row = || -> anyhow::Result<DomainMapping> {
                let transcript = non_empty_cell(transcripts.get(idx))
                    .ok_or_else(|| anyhow!("Missing transcript id"))?;
                let gene = non_empty_cell(genes.get(idx)).ok_or_else(|| anyhow!("Missing gene id"))?;
                let chrom = non_empty_cell(chroms.get(idx)).unwrap_or_default();
                let strand = Strand::from_str(strands.get(idx).unwrap_or_default())?;
                let exons = c.exons.parse(
                    exon_base.and_then(|b| b.get(idx)),
                    exon_starts.get(idx),
                    exon_ends.get(idx),
                )?;

                let Some(domain) = non_empty_cell(domains.get(idx)) else {
                    return Ok(DomainMapping::without_domain(
                        transcript, gene, chrom, strand, exons,
                    ));
                };
                let domain_span = Span::try_new(
                    parse_position(domain_starts.get(idx), &c.domain_start)?,
                    parse_position(domain_ends.get(idx), &c.domain_end)?,
                )?;
                let blocks = c.blocks.parse(
                    block_base.and_then(|b| b.get(idx)),
                    block_starts.get(idx),
                    block_ends.get(idx),
                )?;
                Ok(DomainMapping::new(
                    transcript,
                    gene,
                    Some(domain.to_string()),
                    chrom,
                    strand,
                    Some(domain_span),
                    exons,
                    blocks,
                ))
            };
            rows.push(parse_row().with_context(|| format!("Invalid mapping table row {}", idx + 1))?);
        }

        info!("Read {} transcript/domain mappings", rows.len());
        Ok(rows)
    }
}
