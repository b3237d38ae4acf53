use crate::file_processor::FileProcessorError;
use crate::lexical::FormatError;
use crate::logging::{codes, Code, LogEvent};

/// Pipeline processing errors
///
/// Every variant ends the current file; the batch moves on to the next one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    FileProcessing(#[from] FileProcessorError),

    #[error(transparent)]
    Format(#[from] FormatError),

    /// The check panicked or its worker stopped before finishing
    #[error("{path}: check aborted: {message}")]
    Aborted { path: String, message: String },
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::Format(e) => e.error_code(),
            PipelineError::Aborted { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// Event recorded with the error collector for this failure
    pub fn to_log_event(&self) -> LogEvent {
        let event = LogEvent::error(self.error_code(), &self.to_string());
        match self {
            PipelineError::Format(e) => event.with_position(e.position().clone()),
            PipelineError::FileProcessing(_) | PipelineError::Aborted { .. } => event,
        }
    }
}
