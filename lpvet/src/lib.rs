//! lpvet: static checker for LP-format optimization models
//!
//! Reads LP files line by line, collects the variable names of each
//! section and reports variables that are used without a type declaration
//! (and, optionally, declared variables that are never used).

// Internal modules
pub mod batch;
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod reference_resolution;
pub mod symbols;
pub mod utils;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults, FileOutcome};
pub use pipeline::{PipelineError, PipelineOutput, PipelineResult};
pub use reference_resolution::{CheckOptions, CrossReferenceReport, Diagnostic};
