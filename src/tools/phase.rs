//! Domain phasing: ordering the valid domains of a transcript 5'→3' and
//! serializing them into its DoCo string.

use std::cmp::Ordering;

use indexmap::IndexMap;
use itertools::Itertools;
use log::{
    debug,
    info,
};
use rayon::prelude::*;

use crate::data_structs::doco::domain_token;
use crate::data_structs::{
    DoCo,
    DomainMapping,
    PhasingEntry,
};
use crate::utils::THREAD_POOL;

/// Mapping row annotated with the DoCo of its transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhasedMapping {
    pub mapping: DomainMapping,
    pub doco:    String,
    /// Gene label of the transcript.
    pub gene:    String,
}

/// Partitions rows by transcript id, keeping first-seen transcript order and
/// the input order of rows within each transcript.
pub fn group_by_transcript(rows: Vec<DomainMapping>) -> IndexMap<String, Vec<DomainMapping>> {
    let mut groups: IndexMap<String, Vec<DomainMapping>> = IndexMap::new();
    for row in rows {
        groups
            .entry(row.transcript.clone())
            .or_default()
            .push(row);
    }
    groups
}

/// Stable sort of one transcript's rows by domain start: ascending on the
/// forward (or unknown) strand, descending on the reverse strand.
pub fn sort_domains(rows: &mut [DomainMapping]) {
    let reverse = rows
        .first()
        .map(|r| r.strand.is_reverse())
        .unwrap_or(false);
    rows.sort_by(|a, b| {
        let ord: Ordering = a.domain_start().cmp(&b.domain_start());
        if reverse {
            ord.reverse()
        }
        else {
            ord
        }
    });
}

/// DoCo of one transcript from its already sorted rows. Rows without a
/// domain contribute no token; if none has a domain the DoCo is
/// domain-less.
pub fn build_doco(
    rows: &[DomainMapping],
    gene: &str,
    with_coordinates: bool,
) -> DoCo {
    let tokens = rows
        .iter()
        .filter_map(|r| {
            r.domain.as_ref().map(|domain| {
                domain_token(domain, &r.chrom, r.domain_extent(), r.strand, with_coordinates)
            })
        })
        .collect_vec();
    DoCo::new(tokens, gene)
}

/// Phases a single transcript group. The gene label is taken from the first
/// row of the group as given.
pub fn phase_group(
    mut rows: Vec<DomainMapping>,
    with_coordinates: bool,
) -> Vec<PhasedMapping> {
    let gene = rows
        .first()
        .map(|r| r.gene.clone())
        .unwrap_or_default();
    sort_domains(&mut rows);
    let doco = build_doco(&rows, &gene, with_coordinates).to_string();
    rows.into_iter()
        .map(|mapping| {
            PhasedMapping {
                mapping,
                doco: doco.clone(),
                gene: gene.clone(),
            }
        })
        .collect()
}

/// Phases every transcript of a validated mapping table. Each output row is
/// an input row carrying its transcript's DoCo; rows of one transcript are
/// contiguous and sorted 5'→3'.
pub fn phase_domains(
    rows: Vec<DomainMapping>,
    with_coordinates: bool,
) -> Vec<PhasedMapping> {
    let groups = group_by_transcript(rows);
    let n_transcripts = groups.len();

    let phased: Vec<Vec<PhasedMapping>> = THREAD_POOL.install(|| {
        groups
            .into_values()
            .collect_vec()
            .into_par_iter()
            .map(|group| phase_group(group, with_coordinates))
            .collect()
    });

    info!("Phased domains of {} transcripts", n_transcripts);
    let phased = phased.into_iter().flatten().collect_vec();
    debug!("Phased table has {} rows", phased.len());
    phased
}

/// Collapses the phased table to one entry per transcript.
pub fn collapse_phased(phased: &[PhasedMapping]) -> Vec<PhasingEntry> {
    phased
        .iter()
        .unique_by(|p| p.mapping.transcript.as_str())
        .map(|p| PhasingEntry::new(p.mapping.transcript.clone(), p.doco.clone(), p.gene.clone()))
        .collect()
}
