use serde::{
    Deserialize,
    Serialize,
};

use super::coords::{
    Block,
    Exon,
    Span,
};
use super::enums::Strand;
use super::typedef::PosType;

/// One (transcript, domain) pair reported by the overlap engine, carrying
/// the structure of both features in absolute coordinates.
///
/// A row with `domain == None` is a "no domain" row: the transcript was seen
/// by the overlap step but no domain overlapped it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainMapping {
    pub transcript:  String,
    pub gene:        String,
    pub domain:      Option<String>,
    pub chrom:       String,
    pub strand:      Strand,
    /// Overall footprint of the domain. `None` for no-domain rows.
    pub domain_span: Option<Span>,
    /// Exons of the transcript, sorted ascending by start.
    pub exons:       Vec<Exon>,
    /// Blocks of the domain, sorted ascending by start.
    pub blocks:      Vec<Block>,
}

impl DomainMapping {
    /// Creates a mapping row. Exons and blocks are sorted by start.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transcript: impl Into<String>,
        gene: impl Into<String>,
        domain: Option<String>,
        chrom: impl Into<String>,
        strand: Strand,
        domain_span: Option<Span>,
        mut exons: Vec<Exon>,
        mut blocks: Vec<Block>,
    ) -> Self {
        exons.sort();
        blocks.sort();
        Self {
            transcript: transcript.into(),
            gene: gene.into(),
            domain,
            chrom: chrom.into(),
            strand,
            domain_span,
            exons,
            blocks,
        }
    }

    /// Creates a no-domain row for a transcript.
    pub fn without_domain(
        transcript: impl Into<String>,
        gene: impl Into<String>,
        chrom: impl Into<String>,
        strand: Strand,
        exons: Vec<Exon>,
    ) -> Self {
        Self::new(transcript, gene, None, chrom, strand, None, exons, Vec::new())
    }

    pub fn has_domain(&self) -> bool { self.domain.is_some() }

    /// Genomic extent of the domain. Falls back to the first block start and
    /// last block end when the overall span is unknown.
    pub fn domain_extent(&self) -> Option<Span> {
        self.domain_span.or_else(|| {
            match (self.blocks.first(), self.blocks.last()) {
                (Some(first), Some(last)) => Some(Span::new(first.start(), last.end())),
                _ => None,
            }
        })
    }

    /// Start used to order domains along the transcript.
    pub fn domain_start(&self) -> Option<PosType> {
        self.domain_extent().map(|s| s.start())
    }
}
