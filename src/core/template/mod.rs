//! Elementor template normalization pipeline.
//!
//! A template arrives as a URL, a path, raw text, or an already-parsed value,
//! and leaves as a strictly shaped document written to an [`OutputSink`]:
//!
//! ```text
//! source -> parser -> shape -> normalizer -> assembler -> sink
//! ```
//!
//! Every stage between the read and the write is a pure function and can be
//! used on its own.

pub mod assembler;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod shape;
pub mod sink;
pub mod source;

pub use assembler::{assemble, AssembledTemplate, SiteContext, UNTITLED_TEMPLATE};
pub use normalizer::{normalize_elements, TemplateElement};
pub use parser::parse_with_recovery;
pub use pipeline::{PipelineOutcome, PipelineRun, TemplatePipeline};
pub use shape::{validate_shape, RawNode, ValidatedTemplate};
pub use sink::{ClipboardSink, FileSink, MemorySink, OutputSink, StdoutSink};
pub use source::{DefaultSourceReader, RawTemplateInput, SourceReader};
