/// Genomic coordinate type. Coordinates are 0-based, half-open, as in UCSC
/// tables and BED files.
pub type PosType = u64;

/// Column names of the tables produced by the crate.
pub const TRANSCRIPT_COL: &str = "Transcript";
pub const GENE_COL: &str = "Gene";
pub const DOCO_COL: &str = "DoCo";
