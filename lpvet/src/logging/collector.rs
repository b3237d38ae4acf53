//! Error collector for batch file processing with cargo-style output
//!
//! Groups events by file so a run over many LP files can be summarised
//! after every worker has finished.

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

// ============================================================================
// FILE PROCESSING CONTEXT
// ============================================================================

/// Context information for file processing
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

/// Summary of batch processing results
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub clean_files: usize,
    pub failed_files: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
    pub average_file_time: Duration,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

#[derive(Debug, Default)]
struct FileRecord {
    events: Vec<LogEvent>,
    truncated: bool,
    duration: Option<Duration>,
}

/// Thread-safe error collector for batch processing
pub struct ErrorCollector {
    /// Events organized by file path for cargo-style output
    files: Mutex<BTreeMap<PathBuf, FileRecord>>,

    /// Global processing start time
    processing_start: Instant,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, FileRecord>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a file so it is counted even if it produces no events
    pub fn record_file_context(&self, context: &FileProcessingContext) {
        let mut files = self.lock();
        if files.len() < MAX_TRACKED_FILES || files.contains_key(&context.file_path) {
            files.entry(context.file_path.clone()).or_default();
        }
    }

    /// Record how long a file took once its context is closed
    pub fn record_file_duration(&self, file_path: &Path, duration: Duration) {
        if let Some(record) = self.lock().get_mut(file_path) {
            record.duration = Some(duration);
        }
    }

    /// Record an event for a specific file
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut files = self.lock();
        if files.len() >= MAX_TRACKED_FILES && !files.contains_key(file_path) {
            return;
        }

        let record = files.entry(file_path.to_path_buf()).or_default();

        if record.events.len() < MAX_LOG_EVENTS_PER_FILE {
            record.events.push(event);
        } else if !record.truncated {
            record.truncated = true;
            record.events.push(LogEvent::warning(&format!(
                "Too many events for file (limit: {})",
                MAX_LOG_EVENTS_PER_FILE
            )));
        }
    }

    /// Get all file events (for cargo-style output)
    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        self.lock()
            .iter()
            .map(|(path, record)| (path.clone(), record.events.clone()))
            .collect()
    }

    /// Get processing summary
    pub fn get_summary(&self) -> ProcessingSummary {
        let files = self.lock();

        let mut summary = ProcessingSummary {
            total_files: files.len(),
            total_processing_time: self.processing_start.elapsed(),
            ..ProcessingSummary::default()
        };

        let mut total_file_time = Duration::ZERO;
        let mut file_count_with_timing = 0u32;

        for record in files.values() {
            let errors = record.events.iter().filter(|e| e.is_error()).count();
            let warnings = record.events.iter().filter(|e| e.is_warning()).count();

            if errors > 0 {
                summary.failed_files += 1;
            } else if warnings > 0 {
                summary.files_with_warnings += 1;
            } else {
                summary.clean_files += 1;
            }

            summary.total_errors += errors;
            summary.total_warnings += warnings;

            if let Some(duration) = record.duration {
                total_file_time += duration;
                file_count_with_timing += 1;
            }
        }

        if file_count_with_timing > 0 {
            summary.average_file_time = total_file_time / file_count_with_timing;
        }

        summary
    }

}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

/// Format collected events in cargo-style output
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (file_path, events) in &collector.get_all_file_events() {
        let reportable: Vec<&LogEvent> = events
            .iter()
            .filter(|e| e.is_error() || e.is_warning())
            .collect();
        if reportable.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", file_path.display()));

        for event in reportable {
            let kind = if event.is_error() { "error" } else { "warning" };
            let location = event
                .position
                .as_ref()
                .map(|p| format!(" --> {}", p))
                .unwrap_or_default();

            output.push_str(&format!(
                "{}[{}]: {}{}\n",
                kind,
                event.code.as_str(),
                event.message,
                location
            ));

            for (key, value) in &event.context {
                if key != "file" && key != "file_id" {
                    output.push_str(&format!("  = {}: {}\n", key, value));
                }
            }

            if event.description() != "Unknown error" {
                output.push_str(&format!("  = help: {}\n", event.recommended_action()));
            }
        }

        output.push('\n');
    }

    let summary = collector.get_summary();
    output.push_str(&format!(
        "Checked {} file(s): {} clean, {} with warnings, {} with errors\n",
        summary.total_files,
        summary.clean_files,
        summary.files_with_warnings,
        summary.failed_files
    ));
    if summary.has_errors() {
        output.push_str(&format!("Total errors: {}\n", summary.total_errors));
    }
    if summary.has_warnings() {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}
