//! Coordinate expansion of BED12/genePred style comma-separated lists.
//!
//! UCSC tables store the structure of a feature either as absolute lists
//! (`exonStarts`/`exonEnds`) or as offsets relative to the feature start
//! plus sizes (`chromStarts`/`blockSizes`). Both are turned into [`Span`]s
//! here. Lists must have the same number of tokens; anything else is a fatal
//! input error, lists are never truncated.

use anyhow::{
    anyhow,
    Context,
};
use itertools::Itertools;

use crate::data_structs::typedef::PosType;
use crate::data_structs::Span;

/// Parses `"10,20,30"` or `"10,20,30,"` into numbers. An empty string is
/// an empty list.
pub fn parse_coordinate_list(list: &str) -> anyhow::Result<Vec<PosType>> {
    let trimmed = list.trim();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<PosType>()
                .with_context(|| format!("Malformed coordinate '{}' in list '{}'", token, list))
        })
        .collect()
}

pub fn format_coordinate_list<I: IntoIterator<Item = PosType>>(values: I) -> String {
    values.into_iter().join(",")
}

/// Spans from relative starts and sizes:
/// `start[i] = base + rel_start[i]`, `end[i] = start[i] + size[i]`.
pub fn expand_spans(
    base: PosType,
    rel_starts: &str,
    sizes: &str,
) -> anyhow::Result<Vec<Span>> {
    let rel_starts = parse_coordinate_list(rel_starts)?;
    let sizes = parse_coordinate_list(sizes)?;
    anyhow::ensure!(
        rel_starts.len() == sizes.len(),
        "Length mismatch: {} relative starts but {} sizes",
        rel_starts.len(),
        sizes.len()
    );
    rel_starts
        .into_iter()
        .zip(sizes)
        .map(|(rel_start, size)| {
            let start = base
                .checked_add(rel_start)
                .ok_or_else(|| anyhow!("Coordinate overflow: {} + {}", base, rel_start))?;
            let end = start
                .checked_add(size)
                .ok_or_else(|| anyhow!("Coordinate overflow: {} + {}", start, size))?;
            Ok(Span::new(start, end))
        })
        .collect()
}

/// Spans from absolute start and end lists.
pub fn absolute_spans(
    starts: &str,
    ends: &str,
) -> anyhow::Result<Vec<Span>> {
    let starts = parse_coordinate_list(starts)?;
    let ends = parse_coordinate_list(ends)?;
    anyhow::ensure!(
        starts.len() == ends.len(),
        "Length mismatch: {} starts but {} ends",
        starts.len(),
        ends.len()
    );
    starts
        .into_iter()
        .zip(ends)
        .map(|(start, end)| Span::try_new(start, end))
        .collect()
}

/// Expands relative starts and sizes into absolute start and end lists,
/// both comma-separated.
pub fn expand_coordinates(
    base: PosType,
    rel_starts: &str,
    sizes: &str,
) -> anyhow::Result<(String, String)> {
    let spans = expand_spans(base, rel_starts, sizes)?;
    Ok((
        format_coordinate_list(spans.iter().map(Span::start)),
        format_coordinate_list(spans.iter().map(Span::end)),
    ))
}
