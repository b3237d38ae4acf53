//! File processor module with compile-time constants and global logging integration

mod processor;

use crate::config::constants::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, LP_FILE_EXTENSION, MAX_FILE_SIZE,
};
use crate::log_debug;
pub use processor::{
    split_lines, FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError,
};

/// Initialize file processor logging validation (for system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    use crate::logging::codes::{self, file_processing};

    let required = [
        file_processing::FILE_NOT_FOUND,
        file_processing::INVALID_EXTENSION,
        file_processing::FILE_TOO_LARGE,
        file_processing::PERMISSION_DENIED,
        file_processing::IO_ERROR,
        file_processing::INVALID_PATH,
    ];

    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "extension" => LP_FILE_EXTENSION
    );

    Ok(())
}
