//! Diagnostic types produced by the cross-reference check

use crate::grammar::SectionKind;
use crate::logging::{codes, Code};
use crate::utils::Position;
use serde::Serialize;
use std::fmt;

/// Options controlling which diagnostics are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Report declared variables that are never used
    pub issue_warnings: bool,
}

impl CheckOptions {
    pub fn with_warnings(issue_warnings: bool) -> Self {
        Self { issue_warnings }
    }
}

impl From<&crate::config::runtime::CheckPreferences> for CheckOptions {
    fn from(prefs: &crate::config::runtime::CheckPreferences) -> Self {
        Self::with_warnings(prefs.issue_warnings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl DiagnosticSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "section", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Used in objective, constraints or bounds without a type declaration
    Undeclared,
    /// Declared in the given section but absent from objective and constraints
    Unused(SectionKind),
}

impl DiagnosticKind {
    pub fn severity(&self) -> DiagnosticSeverity {
        match self {
            DiagnosticKind::Undeclared => DiagnosticSeverity::Error,
            DiagnosticKind::Unused(_) => DiagnosticSeverity::Warning,
        }
    }

    /// Message text preceding the variable name
    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticKind::Undeclared => "no var declaration for",
            DiagnosticKind::Unused(SectionKind::Binary) => "no use of binary var",
            DiagnosticKind::Unused(SectionKind::SemiContinuous) => "no use of semi-continuous var",
            DiagnosticKind::Unused(_) => "no use of general var",
        }
    }

    pub fn code(&self) -> Code {
        match self {
            DiagnosticKind::Undeclared => codes::references::UNDECLARED_VARIABLE,
            DiagnosticKind::Unused(_) => codes::references::UNUSED_VARIABLE,
        }
    }
}

/// A single cross-reference finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub position: Position,
    pub value: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, position: Position, value: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            position,
            value: value.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {} {}",
            self.position,
            self.severity.as_str(),
            self.kind.message(),
            self.value
        )
    }
}

/// Everything the check found for one file, in emission order
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrossReferenceReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl CrossReferenceReport {
    /// True if any diagnostic was produced
    pub fn issued(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }
}
