pub use crate::data_structs::{
    AnnotationColumns,
    Block,
    DoCo,
    DomainMapping,
    Exon,
    PhasingDictionary,
    PhasingEntry,
    Span,
    Strand,
    TranscriptAnnotation,
    TranscriptModel,
};
pub use crate::io::counts::CountMatrix;
pub use crate::io::mapping::{
    CoordLayout,
    MappingColumns,
    MappingReader,
    SpanColumns,
};
pub use crate::tools::aggregate::{
    aggregate_counts,
    normalize_transcript_id,
    DocoCounts,
};
pub use crate::tools::phase::{
    collapse_phased,
    phase_domains,
    PhasedMapping,
};
pub use crate::tools::pipeline::{
    DocoConfig,
    DocoPipeline,
    PhasingOutcome,
    PipelineReport,
};
pub use crate::tools::validate::{
    deduplicate_domains,
    validate_blocks,
    DedupOutcome,
    Rejection,
};
