//! Format errors raised while reading an LP file
//!
//! Any of these aborts the current file; no cross-reference diagnostics are
//! produced for it.

use crate::config::constants::compile_time::lexical::{MAX_LINE_LENGTH, MAX_VARIABLE_LENGTH};
use crate::logging::codes;
use crate::utils::Position;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("{position}: line too long ({length} > {MAX_LINE_LENGTH})")]
    LineTooLong { position: Position, length: usize },

    #[error("{position}: not in a section")]
    SectionContext { position: Position },

    #[error("{position}: variable too long: {name:?} ({length} > {MAX_VARIABLE_LENGTH})")]
    VariableTooLong {
        position: Position,
        name: String,
        length: usize,
    },

    #[error("{position}: invalid variable name: {name:?}")]
    InvalidVariableName { position: Position, name: String },
}

impl FormatError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FormatError::LineTooLong { .. } => codes::format::LINE_TOO_LONG,
            FormatError::SectionContext { .. } => codes::format::NOT_IN_SECTION,
            FormatError::VariableTooLong { .. } => codes::format::VARIABLE_TOO_LONG,
            FormatError::InvalidVariableName { .. } => codes::format::INVALID_VARIABLE_NAME,
        }
    }

    /// Line the error was found on
    pub fn position(&self) -> &Position {
        match self {
            FormatError::LineTooLong { position, .. }
            | FormatError::SectionContext { position }
            | FormatError::VariableTooLong { position, .. }
            | FormatError::InvalidVariableName { position, .. } => position,
        }
    }
}
