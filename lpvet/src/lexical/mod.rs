//! Lexical layer for LP files
//!
//! Line classification, data line tokenization and variable name
//! validation. Everything here works on the raw bytes of one line at a
//! time; section state is threaded through by the symbol collector.

pub mod classifier;
pub mod error;
pub mod scan;
pub mod tokenizer;
pub mod validator;

use crate::config::constants::compile_time::lexical::*;
use crate::logging::codes;

pub use classifier::{classify_line, LineClass};
pub use error::FormatError;
pub use tokenizer::{strip_label, tokenize, RawToken};
pub use validator::{is_valid_variable_name, validate_candidate, Validated};

/// Counters gathered while reading one file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LexicalMetrics {
    pub total_lines: usize,
    pub blank_lines: usize,
    pub comment_lines: usize,
    pub keyword_lines: usize,
    pub data_lines: usize,
    pub candidate_tokens: usize,
    pub noise_tokens: usize,
    pub reserved_skipped: usize,
}

impl LexicalMetrics {
    pub fn record_line(&mut self, class: &LineClass<'_>) {
        self.total_lines += 1;
        match class {
            LineClass::Blank => self.blank_lines += 1,
            LineClass::Comment => self.comment_lines += 1,
            LineClass::Keyword(_) => self.keyword_lines += 1,
            LineClass::Data { .. } => self.data_lines += 1,
        }
    }

    pub fn record_token(&mut self, token: &RawToken<'_>) {
        match token {
            RawToken::Candidate(_) => self.candidate_tokens += 1,
            RawToken::Noise(_) => self.noise_tokens += 1,
        }
    }
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

/// Check that every format error code carries metadata
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let format_codes = [
        codes::format::LINE_TOO_LONG,
        codes::format::NOT_IN_SECTION,
        codes::format::VARIABLE_TOO_LONG,
        codes::format::INVALID_VARIABLE_NAME,
    ];

    for code in &format_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Format error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("Lexical limits initialized",
        "max_line_length" => MAX_LINE_LENGTH,
        "max_variable_length" => MAX_VARIABLE_LENGTH
    );

    Ok(())
}
