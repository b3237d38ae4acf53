//! Source location tracking for lpvet
//!
//! LP files are checked line by line, so a location is a file identifier
//! plus a 1-based line number. The file identifier is shared between every
//! position produced for the same file.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A line in a named input, rendered as `file:line`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// File identifier as given on the command line
    pub file: Arc<str>,
    /// Line number (1-based)
    pub line: u32,
}

impl Position {
    /// Create a new position
    pub fn new(file: impl Into<Arc<str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
