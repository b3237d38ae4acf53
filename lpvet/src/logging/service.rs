//! Logging service implementation
//!
//! All loggers write to stderr; stdout is reserved for `--json` results.

use super::events::{LogEvent, LogLevel};
use crate::config::runtime::LoggingPreferences;
use std::sync::Arc;

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service with configuration awareness
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    /// Create new logging service with specified logger and minimum level
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Create service from user preferences
    pub fn with_preferences(prefs: &LoggingPreferences) -> Self {
        let min_level = prefs.min_log_level.to_events_log_level();
        let logger: Arc<dyn Logger> = if !prefs.enable_console_logging {
            Arc::new(NullLogger)
        } else if prefs.use_structured_logging {
            Arc::new(StructuredLogger)
        } else {
            Arc::new(ConsoleLogger)
        };

        Self::new(logger, min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Check if level should be logged
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    /// Log an event
    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Plain text logger on stderr
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", event.format());
    }
}

/// JSON-lines logger on stderr for tooling integration
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        match event.format_json() {
            Ok(json) => eprintln!("{}", json),
            // Fallback to regular format if JSON serialization fails
            Err(_) => eprintln!("{}", event.format()),
        }
    }
}

/// Discards every event
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _event: &LogEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use std::sync::{Mutex, PoisonError};

    /// Keeps every event it receives
    #[derive(Default)]
    struct MemoryLogger {
        events: Mutex<Vec<LogEvent>>,
    }

    impl MemoryLogger {
        fn events(&self) -> Vec<LogEvent> {
            self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }
    }

    impl Logger for MemoryLogger {
        fn log(&self, event: &LogEvent) {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        }
    }

    #[test]
    fn test_service_filters_by_level() {
        let memory = Arc::new(MemoryLogger::default());
        let service = LoggingService::new(memory.clone(), LogLevel::Warning);

        service.log_event(LogEvent::debug("hidden"));
        service.log_event(LogEvent::success(codes::success::PIPELINE_COMPLETE, "hidden too"));
        service.log_event(LogEvent::warning("shown"));
        service.log_event(LogEvent::error(codes::format::LINE_TOO_LONG, "shown"));

        let events = memory.events();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_warning());
        assert!(events[1].is_error() && events[1].code == codes::format::LINE_TOO_LONG);
    }

    #[test]
    fn test_preferences_select_level() {
        let prefs = LoggingPreferences {
            use_structured_logging: true,
            enable_console_logging: true,
            min_log_level: crate::config::runtime::LogLevel::Debug,
            include_file_context: true,
        };
        let service = LoggingService::with_preferences(&prefs);
        assert_eq!(service.min_level(), LogLevel::Debug);
        assert!(service.should_log(LogLevel::Debug));
    }
}
