use std::fmt::{
    self,
    Display,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::typedef::PosType;

/// Absolute genomic interval, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    start: PosType,
    end:   PosType,
}

/// Exon of a transcript.
pub type Exon = Span;
/// Contiguous sub-segment of a protein domain's genomic footprint.
pub type Block = Span;

impl Span {
    /// Creates a new span. `start` must not exceed `end`.
    pub fn new(
        start: PosType,
        end: PosType,
    ) -> Self {
        assert!(
            start <= end,
            "End position can not be less than start! {}-{}",
            start,
            end
        );
        Self { start, end }
    }

    /// Fallible counterpart of [`Span::new`], used on parsed input.
    pub fn try_new(
        start: PosType,
        end: PosType,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            start <= end,
            "End position can not be less than start: {}-{}",
            start,
            end
        );
        Ok(Self { start, end })
    }

    pub fn start(&self) -> PosType { self.start }

    pub fn end(&self) -> PosType { self.end }

    pub fn length(&self) -> PosType { self.end - self.start }

    /// Whether `other` lies fully inside `self` (boundaries inclusive).
    pub fn contains(
        &self,
        other: &Span,
    ) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl Display for Span {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
