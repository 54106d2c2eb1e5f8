//! # doco
//!
//! `doco` derives *Domain Combinations* (DoCos) for transcripts. A DoCo is a
//! string that lists, in 5'→3' order, the protein domains whose genomic
//! blocks align exactly onto a transcript's exons, followed by the gene the
//! transcript belongs to:
//!
//! ```text
//! PF00001,PF00002;;; GENE1     two domains, phased along the transcript
//! ;;; GENE2                    transcript without a valid domain
//! ;;;                          count rows with no known transcript
//! ```
//!
//! The crate then uses the resulting transcript → DoCo dictionary to collapse
//! a transcript-level expression count matrix into DoCo-level counts, which
//! can be fed to differential usage tools.
//!
//! If you do not want to use doco as a crate, check out the `doco` CLI tool
//! from the `console` workspace member.
//!
//! ## Pipeline
//!
//! 1. **Coordinate expansion** ([`tools::expand`]): relative BED12-style
//!    block offsets are turned into absolute coordinates.
//! 2. **Block-exon validation** ([`tools::validate`]): a domain is kept for a
//!    transcript only if its blocks form a gap-free, non-skipping
//!    sub-alignment of the transcript's exons.
//! 3. **Phasing** ([`tools::phase`]): the surviving domains are ordered by
//!    strand and serialized into the DoCo string.
//! 4. **Dictionary** ([`PhasingDictionary`]): every annotated transcript gets
//!    exactly one DoCo, domain-less ones included.
//! 5. **Aggregation** ([`tools::aggregate`]): transcript counts are summed
//!    per DoCo, with unmatched transcripts bucketed into `";;;"`.
//!
//! Overlaps between transcripts and domains are not computed here; the
//! crate consumes a pre-joined overlap table (see [`io::mapping`]).
//!
//! ## Usage
//!
//! ```no_run
//! use std::fs::File;
//! use doco::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = DocoConfig::default().with_unique_domain(true);
//!     let pipeline = DocoPipeline::new(config);
//!
//!     let mappings = MappingReader::new(pipeline.config().columns.clone())
//!         .read(File::open("overlaps.tsv")?)?;
//!     let annotation = TranscriptAnnotation::from_gtf(File::open("genes.gtf")?)?;
//!
//!     let outcome = pipeline.phase(mappings, &annotation)?;
//!     let counts = CountMatrix::from_tsv(File::open("counts.tsv")?, "Transcript")?;
//!     let doco_counts = pipeline.aggregate(&counts, &outcome.dictionary)?;
//!
//!     doco_counts.write_tsv(File::create("doco_counts.tsv")?)?;
//!     Ok(())
//! }
//! ```
//!
//! Number of threads used by the parallel stages can be configured with the
//! `DOCO_NUM_THREADS` environment variable.

pub mod data_structs;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

#[allow(unused_imports)]
use prelude::*;
