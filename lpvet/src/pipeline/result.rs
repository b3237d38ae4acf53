use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::logging::codes;
use crate::reference_resolution::CrossReferenceReport;
use crate::symbols::LpDocument;
use std::time::Duration;

/// Everything produced for one successfully read file
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// File identifier as given by the caller
    pub file: String,
    /// Present when the input came from disk
    pub file_metadata: Option<FileMetadata>,
    pub lexical_metrics: LexicalMetrics,
    pub document: LpDocument,
    pub report: CrossReferenceReport,
    pub processing_duration: Duration,
}

impl PipelineResult {
    /// True if the check produced any diagnostic
    pub fn issued(&self) -> bool {
        self.report.issued()
    }

    pub fn log_success(&self) {
        crate::log_success!(codes::success::PIPELINE_COMPLETE,
            "LP file check completed",
            "file" => self.file.as_str(),
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0),
            "lines" => self.lexical_metrics.total_lines,
            "symbols" => self.document.total_occurrences(),
            "errors" => self.report.error_count(),
            "warnings" => self.report.warning_count()
        );
    }
}
