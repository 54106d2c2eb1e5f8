//! Core data types of the doco crate.
//!
//! - [`Span`] with its [`Exon`] and [`Block`] aliases: absolute, 0-based,
//!   half-open genomic intervals.
//! - [`DomainMapping`]: one transcript/domain overlap together with the
//!   structure of both features.
//! - [`DoCo`]: the domain combination value and its string format.
//! - [`TranscriptAnnotation`] and [`TranscriptModel`]: the universe of known
//!   transcripts and their genes.
//! - [`PhasingDictionary`]: the final transcript → DoCo → gene table.
//! - [`Strand`] and the column-name constants in [`typedef`].

mod annotation;
mod coords;
mod dictionary;
pub mod doco;
mod enums;
mod mapping;
pub mod typedef;

#[cfg(test)]
mod tests;

pub use annotation::{
    AnnotationColumns,
    TranscriptAnnotation,
    TranscriptModel,
};
pub use coords::{
    Block,
    Exon,
    Span,
};
pub use dictionary::{
    PhasingDictionary,
    PhasingEntry,
};
pub use doco::DoCo;
pub use enums::Strand;
pub use mapping::DomainMapping;
