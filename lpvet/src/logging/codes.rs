//! Consolidated error codes and classification system
//!
//! Single source of truth for every code lpvet emits, together with the
//! metadata used to classify it.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
    pub const INVALID_CONFIGURATION: Code = Code::new("ERR004");
    pub const THREAD_FAILURE: Code = Code::new("ERR005");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_FILES: Code = Code::new("E013");
}

/// LP format error codes (abort the file)
pub mod format {
    use super::Code;

    pub const LINE_TOO_LONG: Code = Code::new("E020");
    pub const NOT_IN_SECTION: Code = Code::new("E021");
    pub const VARIABLE_TOO_LONG: Code = Code::new("E022");
    pub const INVALID_VARIABLE_NAME: Code = Code::new("E023");
}

/// Cross-reference diagnostic codes
pub mod references {
    use super::Code;

    pub const UNDECLARED_VARIABLE: Code = Code::new("E110");
    pub const UNUSED_VARIABLE: Code = Code::new("W111");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");

    // Parsing
    pub const SYMBOL_COLLECTION_COMPLETE: Code = Code::new("I050");

    // Cross-reference check
    pub const REFERENCE_CHECK_COMPLETE: Code = Code::new("I060");

    // Whole pipeline
    pub const PIPELINE_COMPLETE: Code = Code::new("I090");
    pub const BATCH_COMPLETE: Code = Code::new("I091");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

type RegistryRow = (
    &'static str,
    &'static str,
    Severity,
    bool,
    bool,
    &'static str,
    &'static str,
);

// (code, category, severity, recoverable, requires_halt, description, action)
const REGISTRY_ROWS: &[RegistryRow] = &[
    (
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Internal error",
        "File a bug report with the input that triggered it",
    ),
    (
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging or runtime initialization failed",
        "Check the environment and configuration",
    ),
    (
        "ERR003",
        "Configuration",
        Severity::High,
        false,
        true,
        "Configuration file could not be read",
        "Check the --config path and its permissions",
    ),
    (
        "ERR004",
        "Configuration",
        Severity::High,
        false,
        true,
        "Configuration file is not valid",
        "Fix the TOML syntax or the reported value",
    ),
    (
        "ERR005",
        "System",
        Severity::High,
        false,
        true,
        "A worker thread failed",
        "Re-run with --sequential and report the failure",
    ),
    (
        "E005",
        "FileProcessing",
        Severity::Medium,
        true,
        false,
        "Input file does not exist",
        "Check the path",
    ),
    (
        "E006",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "Input file does not have the .lp extension",
        "Rename the file or disable the extension requirement",
    ),
    (
        "E007",
        "FileProcessing",
        Severity::Medium,
        true,
        false,
        "Input file exceeds the maximum size",
        "Split the model or check the right file was given",
    ),
    (
        "E009",
        "FileProcessing",
        Severity::Medium,
        true,
        false,
        "Input file cannot be read due to permissions",
        "Check file permissions",
    ),
    (
        "E011",
        "FileProcessing",
        Severity::Medium,
        true,
        false,
        "I/O error while reading input",
        "Check the file system",
    ),
    (
        "E012",
        "FileProcessing",
        Severity::Medium,
        true,
        false,
        "Path is not a regular file",
        "Pass an LP file or a directory of LP files",
    ),
    (
        "E013",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Too many files in one batch",
        "Check fewer files per run",
    ),
    (
        "E020",
        "Format",
        Severity::Medium,
        true,
        false,
        "Line exceeds the maximum LP line length",
        "Break the row over several lines",
    ),
    (
        "E021",
        "Format",
        Severity::Medium,
        true,
        false,
        "Data line appears before any section keyword",
        "Start the file with an objective section keyword",
    ),
    (
        "E022",
        "Format",
        Severity::Medium,
        true,
        false,
        "Variable name exceeds the maximum length",
        "Shorten the variable name",
    ),
    (
        "E023",
        "Format",
        Severity::Medium,
        true,
        false,
        "Variable name contains a character outside the LP name set",
        "Rename the variable using letters, digits and LP punctuation",
    ),
    (
        "E110",
        "References",
        Severity::Medium,
        true,
        false,
        "Variable is used without a general, binary or semi-continuous declaration",
        "Declare the variable or fix the spelling",
    ),
    (
        "W111",
        "References",
        Severity::Low,
        true,
        false,
        "Declared variable is not used in the objective or constraints",
        "Remove the declaration or use the variable",
    ),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ROWS
            .iter()
            .map(
                |&(code, category, severity, recoverable, requires_halt, description, action)| {
                    (
                        code,
                        ErrorMetadata::new(
                            code,
                            category,
                            severity,
                            recoverable,
                            requires_halt,
                            description,
                            action,
                        ),
                    )
                },
            )
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get complete metadata for an error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity for an error code
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|meta| meta.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if an error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|meta| meta.recoverable)
        .unwrap_or(false)
}

/// Check if an error requires halting the run
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|meta| meta.requires_halt)
        .unwrap_or(true)
}

/// Get human readable description
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|meta| meta.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|meta| meta.recommended_action)
        .unwrap_or("Check the logs for details")
}

/// Get error category
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|meta| meta.category)
        .unwrap_or("Unknown")
}

/// All error and warning codes that must carry metadata
pub fn registered_error_codes() -> [Code; 18] {
    [
        system::INTERNAL_ERROR,
        system::INITIALIZATION_FAILURE,
        system::CONFIGURATION_ERROR,
        system::INVALID_CONFIGURATION,
        system::THREAD_FAILURE,
        file_processing::FILE_NOT_FOUND,
        file_processing::INVALID_EXTENSION,
        file_processing::FILE_TOO_LARGE,
        file_processing::PERMISSION_DENIED,
        file_processing::IO_ERROR,
        file_processing::INVALID_PATH,
        file_processing::TOO_MANY_FILES,
        format::LINE_TOO_LONG,
        format::NOT_IN_SECTION,
        format::VARIABLE_TOO_LONG,
        format::INVALID_VARIABLE_NAME,
        references::UNDECLARED_VARIABLE,
        references::UNUSED_VARIABLE,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_has_metadata() {
        for code in registered_error_codes() {
            let meta = get_error_metadata(code.as_str());
            assert!(meta.is_some(), "missing metadata for {}", code);
        }
        assert_eq!(get_error_registry().len(), registered_error_codes().len());
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_category(format::LINE_TOO_LONG.as_str()), "Format");
        assert!(is_recoverable(references::UNUSED_VARIABLE.as_str()));
        assert!(requires_halt(system::INTERNAL_ERROR.as_str()));
        assert_eq!(get_severity("nope"), Severity::Medium);
        assert_eq!(get_description("nope"), "Unknown error");
    }
}
