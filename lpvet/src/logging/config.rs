//! Configuration access for logging
//!
//! Holds the user's logging preferences once they are known and exposes
//! them to the macros without threading a config value through every call.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

// ============================================================================
// RUNTIME PREFERENCES STORAGE
// ============================================================================

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

/// Get minimum log level
pub fn get_min_log_level() -> EventsLogLevel {
    RUNTIME_PREFERENCES
        .get()
        .map(|prefs| prefs.min_log_level)
        .unwrap_or_else(|| LoggingPreferences::default().min_log_level)
        .to_events_log_level()
}

/// Check if structured logging is enabled
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Check if file context is attached to events
pub fn include_file_context() -> bool {
    RUNTIME_PREFERENCES
        .get()
        .map(|prefs| prefs.include_file_context)
        .unwrap_or(true)
}

// ============================================================================
// VALIDATION AND DIAGNOSTICS
// ============================================================================

/// Validate compile-time limits used by the logging system
pub fn validate_config() -> Result<(), String> {
    if MAX_LOG_EVENTS_PER_FILE == 0 {
        return Err("MAX_LOG_EVENTS_PER_FILE must be greater than 0".to_string());
    }
    if MAX_TRACKED_FILES == 0 {
        return Err("MAX_TRACKED_FILES must be greater than 0".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config() {
        assert!(validate_config().is_ok());
    }
}
