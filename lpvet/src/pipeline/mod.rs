//! Per-file check pipeline: read -> collect symbols -> cross-reference

mod error;
pub mod output;
mod result;
mod validation;

// Re-export public types
pub use error::PipelineError;
pub use output::{FileStatus, PipelineOutput};
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::file_processor::{split_lines, FileMetadata, FileProcessor};
use crate::logging;
use crate::reference_resolution::CheckOptions;
use std::time::Instant;

/// Read `file_path` from disk and check it with the default file processor
pub fn process_file(file_path: &str, options: &CheckOptions) -> Result<PipelineResult, PipelineError> {
    process_file_with_processor(&FileProcessor::new(), file_path, options)
}

/// Read `file_path` with `processor` and check it
pub fn process_file_with_processor(
    processor: &FileProcessor,
    file_path: &str,
    options: &CheckOptions,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    crate::log_debug!("Starting LP file check", "file" => file_path);

    let file_result = processor.process_file(file_path).map_err(|e| {
        let error = PipelineError::from(e);
        logging::record_file_event(error.to_log_event());
        error
    })?;

    run_stages(
        file_path,
        &file_result.lines,
        Some(file_result.metadata.clone()),
        options,
        start_time,
    )
}

/// Check in-memory text; `name` is used in every reported position
pub fn process_source(
    name: &str,
    text: &str,
    options: &CheckOptions,
) -> Result<PipelineResult, PipelineError> {
    process_bytes(name, text.as_bytes(), options)
}

/// Check raw file contents, which need not be UTF-8
pub fn process_bytes(
    name: &str,
    bytes: &[u8],
    options: &CheckOptions,
) -> Result<PipelineResult, PipelineError> {
    let (lines, _) = split_lines(bytes);
    process_lines(name, &lines, options)
}

/// Check lines already split from a file
pub fn process_lines<I, L>(
    name: &str,
    lines: I,
    options: &CheckOptions,
) -> Result<PipelineResult, PipelineError>
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    run_stages(name, lines, None, options, Instant::now())
}

fn run_stages<I, L>(
    name: &str,
    lines: I,
    file_metadata: Option<FileMetadata>,
    options: &CheckOptions,
    start_time: Instant,
) -> Result<PipelineResult, PipelineError>
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    // Stage 1: symbol collection; a format error ends the file
    let discovery = crate::symbols::discover_symbols(name, lines).map_err(|e| {
        let error = PipelineError::from(e);
        logging::record_file_event(error.to_log_event());
        error
    })?;

    // Stage 2: cross-reference check over the complete tables
    let report = crate::reference_resolution::validate_references(&discovery.document, options);

    let result = PipelineResult {
        file: name.to_string(),
        file_metadata,
        lexical_metrics: discovery.metrics,
        document: discovery.document,
        report,
        processing_duration: start_time.elapsed(),
    };

    result.log_success();

    Ok(result)
}
