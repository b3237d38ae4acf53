//! Batch processing module for LP file checking
//!
//! Runs the pipeline over every input path, sequentially or on a small set
//! of worker threads. Outcomes always come back in input order so that
//! reported messages do not depend on scheduling.

use crate::config::constants::compile_time::batch_processing::{
    MAX_FILES_PER_BATCH, MAX_WORKER_THREADS,
};
use crate::config::constants::compile_time::file_processing::LP_FILE_EXTENSION;
use crate::config::RuntimeConfig;
use crate::file_processor::{FileProcessor, FileProcessorError};
use crate::logging::{self, codes};
use crate::pipeline::{self, PipelineError, PipelineResult};
use crate::reference_resolution::CheckOptions;
use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

/// Batch processing configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub recursive: bool,
    pub progress_reporting: bool,
    pub check: CheckOptions,
    pub file_processor: FileProcessor,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: std::thread::available_parallelism()
                .map(|n| n.get().min(8))
                .unwrap_or(4),
            recursive: true,
            progress_reporting: false,
            check: CheckOptions::default(),
            file_processor: FileProcessor::new(),
        }
    }
}

impl BatchConfig {
    /// Build a batch configuration from loaded runtime configuration
    pub fn from_runtime_config(config: &RuntimeConfig) -> Self {
        Self {
            max_threads: config.batch.max_threads.clamp(1, MAX_WORKER_THREADS),
            recursive: config.batch.recursive,
            progress_reporting: config.batch.progress_reporting,
            check: CheckOptions::from(&config.check),
            file_processor: FileProcessor::from_preferences(&config.file_processor),
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.max_threads = threads.clamp(1, MAX_WORKER_THREADS);
        self
    }

    pub fn with_warnings(mut self, issue_warnings: bool) -> Self {
        self.check.issue_warnings = issue_warnings;
        self
    }
}

/// Result for one input file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// Path as given on the command line, or found under a directory argument
    pub path: String,
    pub result: Result<PipelineResult, PipelineError>,
}

impl FileOutcome {
    /// True if the cross-reference check produced a diagnostic.
    ///
    /// Read and format errors do not count.
    pub fn issued(&self) -> bool {
        self.result.as_ref().map(|r| r.issued()).unwrap_or(false)
    }
}

/// Batch processing results, in input order
#[derive(Debug, Default)]
pub struct BatchResults {
    pub outcomes: Vec<FileOutcome>,
    pub processing_duration: Duration,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any file produced a diagnostic
    pub fn any_issued(&self) -> bool {
        self.outcomes.iter().any(FileOutcome::issued)
    }

    pub fn files_processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.files_processed() - self.success_count()
    }

    pub fn issued_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.issued()).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch completed: {} files checked, {} with diagnostics, {} failed, {:.2}s total",
            self.files_processed(),
            self.issued_count(),
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

/// Batch processing errors
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Too many files found: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("Thread pool error: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BatchError::TooManyFiles { .. } => codes::file_processing::TOO_MANY_FILES,
            BatchError::ThreadError { .. } => codes::system::THREAD_FAILURE,
        }
    }
}

// ============================================================================
// INPUT EXPANSION
// ============================================================================

/// A path to check, or the reason a directory argument could not be listed
#[derive(Debug, Clone)]
enum BatchInput {
    File(String),
    Unlisted {
        path: String,
        error: FileProcessorError,
    },
}

impl BatchInput {
    fn path(&self) -> &str {
        match self {
            BatchInput::File(path) | BatchInput::Unlisted { path, .. } => path,
        }
    }
}

/// Find `.lp` files below `dir_path`, sorted by path
pub fn discover_lp_files(dir_path: &Path, recursive: bool) -> Result<Vec<PathBuf>, FileProcessorError> {
    crate::log_debug!("Starting file discovery",
        "directory" => dir_path.display(),
        "recursive" => recursive
    );

    let mut files = Vec::new();
    visit_directory(dir_path, recursive, &mut files)?;

    // Sort files for deterministic processing order
    files.sort();

    crate::log_debug!("File discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

fn visit_directory(
    dir_path: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), FileProcessorError> {
    let display = dir_path.display().to_string();
    let entries = fs::read_dir(dir_path).map_err(|e| FileProcessorError::from_io(&display, &e))?;

    for entry in entries {
        let entry = entry.map_err(|e| FileProcessorError::from_io(&display, &e))?;
        let path = entry.path();

        if path.is_dir() {
            if recursive {
                visit_directory(&path, recursive, files)?;
            }
        } else if is_lp_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a path names a regular file with the .lp extension
fn is_lp_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(LP_FILE_EXTENSION))
            .unwrap_or(false)
}

/// Replace each directory argument by the files found under it
fn expand_inputs<S: AsRef<str>>(paths: &[S], recursive: bool) -> Result<Vec<BatchInput>, BatchError> {
    let mut inputs = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        if Path::new(path).is_dir() {
            match discover_lp_files(Path::new(path), recursive) {
                Ok(found) => inputs.extend(
                    found
                        .into_iter()
                        .map(|file| BatchInput::File(file.display().to_string())),
                ),
                Err(error) => inputs.push(BatchInput::Unlisted {
                    path: path.to_string(),
                    error,
                }),
            }
        } else {
            inputs.push(BatchInput::File(path.to_string()));
        }

        if inputs.len() > MAX_FILES_PER_BATCH {
            return Err(BatchError::TooManyFiles {
                count: inputs.len(),
                max: MAX_FILES_PER_BATCH,
            });
        }
    }

    Ok(inputs)
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Run `check` for one file under its file context.
///
/// A panic inside `check` becomes an `Aborted` failure for that file only.
fn run_isolated<F>(path: &str, file_id: usize, check: F) -> Result<PipelineResult, PipelineError>
where
    F: FnOnce() -> Result<PipelineResult, PipelineError>,
{
    logging::with_file_context(PathBuf::from(path), file_id, || {
        panic::catch_unwind(AssertUnwindSafe(check)).unwrap_or_else(|payload| {
            let error = PipelineError::Aborted {
                path: path.to_string(),
                message: panic_message(&*payload),
            };
            logging::record_file_event(error.to_log_event());
            Err(error)
        })
    })
}

/// Run the pipeline on one input
fn process_input(input: &BatchInput, file_id: usize, config: &BatchConfig) -> FileOutcome {
    let path = input.path().to_string();

    let result = run_isolated(&path, file_id, || match input {
        BatchInput::File(file) => {
            pipeline::process_file_with_processor(&config.file_processor, file, &config.check)
        }
        BatchInput::Unlisted { error, .. } => {
            let error = PipelineError::from(error.clone());
            logging::record_file_event(error.to_log_event());
            Err(error)
        }
    });

    FileOutcome { path, result }
}

fn report_progress(config: &BatchConfig, file_id: usize, total: usize, path: &str) {
    if config.progress_reporting {
        crate::log_info!("Checking file",
            "index" => file_id + 1,
            "total" => total,
            "file" => path
        );
    }
}

fn process_sequential(inputs: &[BatchInput], config: &BatchConfig) -> Vec<FileOutcome> {
    inputs
        .iter()
        .enumerate()
        .map(|(file_id, input)| {
            report_progress(config, file_id, inputs.len(), input.path());
            process_input(input, file_id, config)
        })
        .collect()
}

/// Process inputs on worker threads, each taking a contiguous slice.
///
/// A worker that dies leaves its unfinished files marked `Aborted`; the
/// other outcomes are kept.
fn process_parallel(
    inputs: Vec<BatchInput>,
    config: &BatchConfig,
) -> Result<Vec<FileOutcome>, BatchError> {
    let total = inputs.len();
    let slots: Arc<Mutex<Vec<Option<FileOutcome>>>> = Arc::new(Mutex::new(vec![None; total]));
    let inputs = Arc::new(inputs);

    let threads = config.max_threads.min(total).max(1);
    let files_per_thread = (total + threads - 1) / threads;

    crate::log_debug!("Parallel processing configuration",
        "total_files" => total,
        "files_per_thread" => files_per_thread,
        "threads" => threads
    );

    let mut handles = Vec::new();
    for thread_id in 0..threads {
        let start_idx = thread_id * files_per_thread;
        let end_idx = ((thread_id + 1) * files_per_thread).min(total);
        if start_idx >= end_idx {
            break;
        }

        let inputs = Arc::clone(&inputs);
        let slots = Arc::clone(&slots);
        let config = config.clone();

        let handle = thread::spawn(move || {
            for file_id in start_idx..end_idx {
                let input = &inputs[file_id];
                report_progress(&config, file_id, total, input.path());
                let outcome = process_input(input, file_id, &config);

                let mut guard = slots.lock().unwrap_or_else(PoisonError::into_inner);
                guard[file_id] = Some(outcome);
            }
        });

        handles.push((thread_id, handle));
    }

    // Wait for all threads to complete
    for (thread_id, handle) in handles {
        if let Err(payload) = handle.join() {
            crate::log_error!(codes::system::THREAD_FAILURE,
                "Worker thread stopped early",
                "thread" => thread_id,
                "reason" => panic_message(&*payload)
            );
        }
    }

    let slots = Arc::try_unwrap(slots)
        .map_err(|_| BatchError::ThreadError {
            message: "Failed to extract results from worker threads".to_string(),
        })?
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);

    Ok(slots
        .into_iter()
        .zip(inputs.iter())
        .map(|(slot, input)| {
            slot.unwrap_or_else(|| aborted_outcome(input.path(), "worker thread stopped"))
        })
        .collect())
}

fn aborted_outcome(path: &str, message: &str) -> FileOutcome {
    let error = PipelineError::Aborted {
        path: path.to_string(),
        message: message.to_string(),
    };
    logging::record_file_event(error.to_log_event());
    FileOutcome {
        path: path.to_string(),
        result: Err(error),
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Check every path in `paths`, expanding directories
pub fn process_paths<S: AsRef<str>>(
    paths: &[S],
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    let inputs = expand_inputs(paths, config.recursive)?;
    let parallel = config.max_threads > 1 && inputs.len() > 1;

    crate::log_debug!("Starting batch processing",
        "inputs" => inputs.len(),
        "parallel" => parallel,
        "max_threads" => config.max_threads
    );

    let outcomes = if parallel {
        process_parallel(inputs, config)?
    } else {
        process_sequential(&inputs, config)
    };

    let results = BatchResults {
        outcomes,
        processing_duration: start_time.elapsed(),
    };

    crate::log_success!(
        codes::success::BATCH_COMPLETE,
        "Batch processing completed",
        "files_processed" => results.files_processed(),
        "with_diagnostics" => results.issued_count(),
        "failed" => results.failure_count(),
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    const CLEAN: &str = "max\n x\ngen\n x\nend\n";
    const UNDECLARED: &str = "max\n x + y\ngen\n x\n";

    #[test]
    fn test_file_discovery() {
        let temp_dir = tempdir().unwrap();
        let temp_path = temp_dir.path();

        fs::write(temp_path.join("b.lp"), CLEAN).unwrap();
        fs::write(temp_path.join("a.LP"), CLEAN).unwrap();
        fs::write(temp_path.join("notes.txt"), "not lp").unwrap();
        fs::create_dir(temp_path.join("sub")).unwrap();
        fs::write(temp_path.join("sub").join("c.lp"), CLEAN).unwrap();

        let files = discover_lp_files(temp_path, true).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(temp_path).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["a.LP", "b.lp", format!("sub{}c.lp", std::path::MAIN_SEPARATOR).as_str()]);

        assert_eq!(discover_lp_files(temp_path, false).unwrap().len(), 2);
    }

    #[test]
    fn test_outcomes_keep_input_order() {
        let temp_dir = tempdir().unwrap();
        let mut paths = Vec::new();
        for i in 0..9 {
            let path = temp_dir.path().join(format!("m{}.lp", i));
            fs::write(&path, if i % 3 == 0 { UNDECLARED } else { CLEAN }).unwrap();
            paths.push(path.display().to_string());
        }
        paths.insert(4, temp_dir.path().join("missing.lp").display().to_string());

        let config = BatchConfig::default().with_threads(4);
        let results = process_paths(&paths, &config).unwrap();

        let got: Vec<&str> = results.outcomes.iter().map(|o| o.path.as_str()).collect();
        let want: Vec<&str> = paths.iter().map(String::as_str).collect();
        assert_eq!(got, want);

        assert_eq!(results.files_processed(), 10);
        assert_eq!(results.failure_count(), 1);
        assert_eq!(results.issued_count(), 3);
        assert!(results.any_issued());
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let temp_dir = tempdir().unwrap();
        let paths: Vec<String> = (0..5)
            .map(|i| {
                let path = temp_dir.path().join(format!("s{}.lp", i));
                fs::write(&path, UNDECLARED).unwrap();
                path.display().to_string()
            })
            .collect();

        let render = |results: &BatchResults| -> Vec<String> {
            results
                .outcomes
                .iter()
                .flat_map(|o| match &o.result {
                    Ok(r) => r.report.diagnostics.iter().map(|d| d.to_string()).collect(),
                    Err(e) => vec![e.to_string()],
                })
                .collect()
        };

        let sequential = process_paths(&paths, &BatchConfig::default().with_threads(1)).unwrap();
        let parallel = process_paths(&paths, &BatchConfig::default().with_threads(3)).unwrap();
        assert_eq!(render(&sequential), render(&parallel));
        assert_eq!(render(&sequential).len(), 5);
    }

    #[test]
    fn test_failures_do_not_count_as_issued() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("orphan.lp");
        fs::write(&path, "x + y\n").unwrap();

        let paths = [path.display().to_string()];
        let results = process_paths(&paths, &BatchConfig::default()).unwrap();
        assert_eq!(results.failure_count(), 1);
        assert!(!results.any_issued());
    }

    #[test]
    fn test_directory_argument_expands() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("one.lp"), CLEAN).unwrap();
        fs::write(temp_dir.path().join("two.lp"), UNDECLARED).unwrap();

        let paths = [temp_dir.path().display().to_string()];
        let results = process_paths(&paths, &BatchConfig::default().with_warnings(true)).unwrap();
        assert_eq!(results.files_processed(), 2);
        assert_eq!(results.issued_count(), 1);
    }

    #[test]
    fn test_batch_config_from_runtime() {
        let mut runtime = RuntimeConfig::default();
        runtime.batch.max_threads = 1000;
        runtime.check.issue_warnings = true;

        let config = BatchConfig::from_runtime_config(&runtime);
        assert_eq!(config.max_threads, MAX_WORKER_THREADS);
        assert!(config.check.issue_warnings);
    }

    #[test]
    fn test_panic_is_contained_to_one_file() {
        let result = run_isolated("boom.lp", 7, || panic!("table index {} out of range", 3));
        assert_matches!(
            result,
            Err(PipelineError::Aborted { ref path, ref message })
                if path == "boom.lp" && message == "table index 3 out of range"
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "boom.lp: check aborted: table index 3 out of range"
        );
        assert!(logging::get_current_file_context().is_none());

        let result = run_isolated("ok.lp", 8, || {
            pipeline::process_source("ok.lp", CLEAN, &CheckOptions::default())
        });
        assert_matches!(result, Ok(r) if !r.issued());
    }

    #[test]
    fn test_aborted_outcome() {
        let outcome = aborted_outcome("late.lp", "worker thread stopped");
        assert!(!outcome.issued());
        assert_eq!(outcome.path, "late.lp");
        assert_matches!(outcome.result, Err(PipelineError::Aborted { .. }));

        let results = BatchResults {
            outcomes: vec![outcome],
            processing_duration: Duration::ZERO,
        };
        assert_eq!(results.failure_count(), 1);
        assert!(!results.any_issued());
    }
}
