//! Block-exon validation and domain deduplication.
//!
//! A domain is kept for a transcript only when its blocks are an exact,
//! gap-free sub-alignment of the transcript's exons:
//!
//! - every block is contained in exactly one exon;
//! - with several blocks, the first one ends on its exon's end, the last one
//!   starts on its exon's start and interior blocks match their exon
//!   exactly;
//! - the exons hit by consecutive blocks are consecutive.
//!
//! A single failing block rejects the whole row.

use std::collections::BTreeMap;
use std::fmt::{
    self,
    Display,
};

use hashbrown::HashSet;
use log::{
    debug,
    info,
    warn,
};
use rayon::prelude::*;

use crate::data_structs::{
    Block,
    DomainMapping,
    Exon,
};
use crate::utils::THREAD_POOL;

/// Reason a mapping row failed validation. Block indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The row has a domain but no blocks.
    NoBlocks,
    /// No exon contains the block.
    NoContainingExon { block: usize },
    /// More than one exon contains the block.
    AmbiguousExon { block: usize },
    /// The block does not end/start on the required exon boundary.
    BoundaryMismatch { block: usize },
    /// The block maps to an exon that does not follow the previous block's.
    ExonSkip { block: usize },
}

impl Rejection {
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::NoBlocks => "no blocks",
            Rejection::NoContainingExon { .. } => "no containing exon",
            Rejection::AmbiguousExon { .. } => "ambiguous exon",
            Rejection::BoundaryMismatch { .. } => "boundary mismatch",
            Rejection::ExonSkip { .. } => "exon skip",
        }
    }
}

impl Display for Rejection {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Rejection::NoBlocks => write!(f, "{}", self.kind()),
            Rejection::NoContainingExon { block }
            | Rejection::AmbiguousExon { block }
            | Rejection::BoundaryMismatch { block }
            | Rejection::ExonSkip { block } => write!(f, "{} at block {}", self.kind(), block),
        }
    }
}

/// Indices of the exons that fully contain `block`.
pub fn candidate_exons(
    exons: &[Exon],
    block: &Block,
) -> Vec<usize> {
    exons
        .iter()
        .enumerate()
        .filter(|(_, exon)| exon.contains(block))
        .map(|(idx, _)| idx)
        .collect()
}

/// Boundary rule for block `idx` out of `n_blocks`.
fn matches_boundaries(
    exon: &Exon,
    block: &Block,
    idx: usize,
    n_blocks: usize,
) -> bool {
    if n_blocks == 1 {
        return true;
    }
    let first = idx == 0;
    let last = idx == n_blocks - 1;
    match (first, last) {
        (true, _) => block.end() == exon.end(),
        (_, true) => block.start() == exon.start(),
        _ => block.start() == exon.start() && block.end() == exon.end(),
    }
}

/// Maps every block onto an exon, returning the exon index per block, or
/// the first reason the alignment fails.
pub fn validate_blocks(
    exons: &[Exon],
    blocks: &[Block],
) -> Result<Vec<usize>, Rejection> {
    if blocks.is_empty() {
        return Err(Rejection::NoBlocks);
    }

    let mut mapped = Vec::with_capacity(blocks.len());
    for (idx, block) in blocks.iter().enumerate() {
        let exon_idx = match candidate_exons(exons, block).as_slice() {
            [] => return Err(Rejection::NoContainingExon { block: idx }),
            [single] => *single,
            _ => return Err(Rejection::AmbiguousExon { block: idx }),
        };
        if !matches_boundaries(&exons[exon_idx], block, idx, blocks.len()) {
            return Err(Rejection::BoundaryMismatch { block: idx });
        }
        if let Some(prev) = mapped.last() {
            if exon_idx != prev + 1 {
                return Err(Rejection::ExonSkip { block: idx });
            }
        }
        mapped.push(exon_idx);
    }
    Ok(mapped)
}

/// Validates a mapping row. Rows without a domain are kept untouched so the
/// transcript still reaches the phaser.
pub fn validate_mapping(mapping: &DomainMapping) -> Result<(), Rejection> {
    if !mapping.has_domain() {
        return Ok(());
    }
    validate_blocks(&mapping.exons, &mapping.blocks).map(|_| ())
}

/// Result of [`deduplicate_domains`].
#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    /// Valid rows, in input order.
    pub kept:       Vec<DomainMapping>,
    /// Number of rows dropped by block validation.
    pub rejected:   usize,
    /// Number of valid rows dropped as repeated (transcript, domain) pairs.
    pub duplicates: usize,
    /// Rejected rows per [`Rejection::kind`].
    pub rejections: BTreeMap<&'static str, usize>,
}

/// Drops mapping rows whose blocks do not align with the transcript's exons.
///
/// With `unique_domain`, only the first valid row of each
/// (transcript, domain) pair is kept, so a domain that aligns in several
/// equally valid ways counts once per transcript.
pub fn deduplicate_domains(
    rows: Vec<DomainMapping>,
    unique_domain: bool,
) -> DedupOutcome {
    let total = rows.len();
    let checked: Vec<(Result<(), Rejection>, DomainMapping)> = THREAD_POOL.install(|| {
        rows.into_par_iter()
            .map(|row| (validate_mapping(&row), row))
            .collect()
    });

    let mut outcome = DedupOutcome::default();
    let mut seen: HashSet<(String, Option<String>)> = HashSet::new();
    for (verdict, row) in checked {
        match verdict {
            Err(rejection) => {
                outcome.rejected += 1;
                *outcome
                    .rejections
                    .entry(rejection.kind())
                    .or_default() += 1;
            },
            Ok(()) if unique_domain => {
                if seen.insert((row.transcript.clone(), row.domain.clone())) {
                    outcome.kept.push(row);
                }
                else {
                    outcome.duplicates += 1;
                }
            },
            Ok(()) => outcome.kept.push(row),
        }
    }

    info!(
        "{} of {} domain mappings passed block validation",
        outcome.kept.len() + outcome.duplicates,
        total
    );
    if outcome.rejected > 0 {
        warn!(
            "Dropped {} domain mappings whose blocks do not align with transcript exons",
            outcome.rejected
        );
        for (kind, count) in outcome.rejections.iter() {
            debug!("Rejected mappings ({}): {}", kind, count);
        }
    }
    if outcome.duplicates > 0 {
        info!("Dropped {} repeated transcript/domain mappings", outcome.duplicates);
    }
    outcome
}
