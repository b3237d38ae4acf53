//! File processor implementation with compile-time limits and global logging

use crate::config::constants::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, LP_FILE_EXTENSION, MAX_FILE_SIZE,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_performance, log_success, log_warning};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("open {path}: no such file or directory")]
    FileNotFound { path: String },

    #[error("{path}: expected .lp extension, found {}", extension.as_deref().unwrap_or("none"))]
    InvalidExtension {
        path: String,
        extension: Option<String>,
    },

    #[error("{path}: file too large ({size} > {max_size} bytes)")]
    FileTooLarge {
        path: String,
        size: u64,
        max_size: u64,
    },

    #[error("open {path}: permission denied")]
    PermissionDenied { path: String },

    #[error("read {path}: {message}")]
    IoError { path: String, message: String },

    #[error("read {path}: not a regular file")]
    InvalidPath { path: String },
}

impl FileProcessorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    /// Map an `io::Error` raised while touching `path`
    pub fn from_io(path: &str, error: &io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.to_string(),
            },
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.to_string(),
            },
            _ => FileProcessorError::IoError {
                path: path.to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// File extension (if any), lower-cased
    pub extension: Option<String>,
    /// Number of lines in file
    pub line_count: usize,
    /// Whether file has .lp extension
    pub is_lp_file: bool,
    /// Lines that are not valid UTF-8
    pub non_utf8_lines: usize,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

/// File processing result containing lines and metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    /// Path as given by the caller; used in diagnostics
    pub display_path: String,
    /// Raw file contents split into lines, line terminators removed
    pub lines: Vec<Vec<u8>>,
    pub metadata: FileMetadata,
    pub processing_duration: std::time::Duration,
}

/// Split raw bytes into lines.
///
/// Lines end at LF; one trailing CR is removed. A final line without a
/// terminator is kept. Bytes are left as they are; the return value also
/// counts the lines that are not valid UTF-8.
pub fn split_lines(bytes: &[u8]) -> (Vec<Vec<u8>>, usize) {
    let mut lines: Vec<Vec<u8>> = bytes
        .split(|&b| b == b'\n')
        .map(|raw| raw.strip_suffix(b"\r").unwrap_or(raw).to_vec())
        .collect();

    // `split` yields an empty piece after a trailing LF (or for empty input)
    if bytes.is_empty() || bytes.ends_with(b"\n") {
        lines.pop();
    }

    let non_utf8 = lines
        .iter()
        .filter(|line| std::str::from_utf8(line).is_err())
        .count();

    (lines, non_utf8)
}

/// File processor with compile-time limits and runtime preferences
#[derive(Debug, Clone, Default)]
pub struct FileProcessor {
    /// Whether to reject files without the .lp extension
    pub require_lp_extension: bool,
    /// Whether to log timing information on success
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    /// Create new file processor with default preferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Create file processor from runtime preferences
    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_lp_extension: prefs.require_lp_extension,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    /// Read a file and split it into lines
    pub fn process_file(
        &self,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = std::time::Instant::now();

        log_debug!("Starting file processing", "file" => file_path);

        // Step 1: Path validation
        let path = self.validate_path(file_path)?;

        // Step 2: Metadata collection
        let mut metadata = self.get_metadata(&path, file_path)?;

        // Step 3: File validation
        self.validate_file(&metadata, file_path)?;

        // Step 4: Content reading
        let bytes = fs::read(&path).map_err(|e| FileProcessorError::from_io(file_path, &e))?;
        let (lines, non_utf8_lines) = split_lines(&bytes);

        metadata.line_count = lines.len();
        metadata.non_utf8_lines = non_utf8_lines;

        let result = FileProcessingResult {
            display_path: file_path.to_string(),
            lines,
            metadata,
            processing_duration: start_time.elapsed(),
        };

        self.log_processing_success(&result);

        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult) {
        if result.metadata.non_utf8_lines > 0 {
            log_debug!("File contains lines that are not valid UTF-8",
                "file" => result.display_path.as_str(),
                "lines" => result.metadata.non_utf8_lines
            );
        }

        if self.enable_performance_logging {
            log_performance!(codes::success::FILE_PROCESSING_SUCCESS,
                "File read with performance metrics",
                duration = result.processing_duration,
                "file" => result.display_path.as_str(),
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "is_large_file" => result.metadata.is_large_file()
            );
        } else {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS,
                "File read",
                "file" => result.display_path.as_str(),
                "lines" => result.metadata.line_count
            );
        }
    }

    /// Validate file path and check existence
    fn validate_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        if file_path.is_empty() {
            return Err(FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            });
        }

        let path = Path::new(file_path);
        let canonical = path
            .canonicalize()
            .map_err(|e| FileProcessorError::from_io(file_path, &e))?;

        if !canonical.is_file() {
            return Err(FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            });
        }

        log_debug!("Path validation successful", "canonical_path" => canonical.display());
        Ok(canonical)
    }

    /// Get file metadata
    fn get_metadata(&self, path: &Path, file_path: &str) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| FileProcessorError::from_io(file_path, &e))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());
        let is_lp_file = extension.as_deref() == Some(LP_FILE_EXTENSION);

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension,
            line_count: 0,
            is_lp_file,
            non_utf8_lines: 0,
        };

        log_debug!("File metadata collected",
            "size_human" => file_metadata.human_readable_size(),
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "is_lp" => is_lp_file
        );

        Ok(file_metadata)
    }

    /// Validate file properties using compile-time limits
    fn validate_file(
        &self,
        metadata: &FileMetadata,
        file_path: &str,
    ) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            return Err(FileProcessorError::FileTooLarge {
                path: file_path.to_string(),
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            });
        }

        if metadata.is_large_file() {
            log_warning!("Large input file",
                "file" => file_path,
                "size_human" => metadata.human_readable_size()
            );
        }

        if self.require_lp_extension && !metadata.is_lp_file {
            return Err(FileProcessorError::InvalidExtension {
                path: file_path.to_string(),
                extension: metadata.extension.clone(),
            });
        }

        Ok(())
    }
}
