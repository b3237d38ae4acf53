//! Machine-readable per-file output for `--json`

use super::{PipelineError, PipelineResult};
use crate::lexical::LexicalMetrics;
use crate::reference_resolution::Diagnostic;
use crate::symbols::SectionSummary;
use crate::utils::Position;
use serde::Serialize;

/// Overall outcome for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Read and checked, nothing reported
    Clean,
    /// Read and checked, diagnostics reported
    Issues,
    /// Could not be read or violated the format
    Failed,
}

/// Failure description carried by a `failed` record
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// One JSON line per file
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub file: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<LexicalMetrics>,
}

impl PipelineOutput {
    pub fn from_result(result: &PipelineResult) -> Self {
        Self {
            file: result.file.clone(),
            status: if result.issued() {
                FileStatus::Issues
            } else {
                FileStatus::Clean
            },
            error: None,
            diagnostics: result.report.diagnostics.clone(),
            sections: result.document.summaries(),
            metrics: Some(result.lexical_metrics),
        }
    }

    pub fn from_error(file: &str, error: &PipelineError) -> Self {
        let position = match error {
            PipelineError::Format(e) => Some(e.position().clone()),
            PipelineError::FileProcessing(_) | PipelineError::Aborted { .. } => None,
        };

        Self {
            file: file.to_string(),
            status: FileStatus::Failed,
            error: Some(ErrorOutput {
                code: error.error_code().as_str().to_string(),
                message: error.to_string(),
                position,
            }),
            diagnostics: Vec::new(),
            sections: Vec::new(),
            metrics: None,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
