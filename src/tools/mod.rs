//! The DoCo pipeline stages.
//!
//! - [`expand`]: relative/absolute coordinate lists into spans.
//! - [`validate`]: block-exon validation and domain deduplication.
//! - [`phase`]: strand-aware ordering of domains into DoCo strings.
//! - [`dictionary`]: one DoCo per annotated transcript.
//! - [`aggregate`]: transcript counts into DoCo counts.
//! - [`pipeline`]: configuration, orchestration and run report.

pub mod aggregate;
pub mod dictionary;
pub mod expand;
pub mod phase;
pub mod pipeline;
pub mod validate;
