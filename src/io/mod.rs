//! File input and output.
//!
//! - [`mapping`]: overlap tables (transcript/domain pairs with their exon and
//!   block structure) into [`DomainMapping`](crate::data_structs::DomainMapping)s.
//! - [`gtf`]: transcript structures from GTF files.
//! - [`counts`]: transcript-level count matrices.
//! - [`table`]: tab-separated table helpers built on polars.

pub mod counts;
pub mod gtf;
pub mod mapping;
pub mod table;
