//! Diagnostic logger trait
//!
//! The router reports its own failures (formatter errors, files that cannot
//! be opened) through a `Logger` rather than through the routes it manages.

use std::sync::Arc;

use crate::types::Level;

/// Side channel for the router's own diagnostics
///
/// Implementations:
/// - `ConsoleLogger`: writes to stderr (the default)
/// - `NoOpLogger`: discards everything
/// - `MemoryLogger`: keeps lines in memory for tests
pub trait Logger: Send + Sync {
    /// Record a diagnostic line
    fn log(&self, level: Level, message: &str);

    /// Log a debug message
    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    /// Log an info message
    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    /// Log a warning message
    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    /// Log an error message
    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

/// Extension trait for logging with format arguments
pub trait LoggerExt: Logger {
    /// Log at `level` with format arguments
    fn log_fmt(&self, level: Level, args: std::fmt::Arguments<'_>) {
        self.log(level, &args.to_string());
    }

    /// Log an error message with format arguments
    fn error_fmt(&self, args: std::fmt::Arguments<'_>) {
        self.log_fmt(Level::Error, args);
    }
}

impl<T: Logger + ?Sized> LoggerExt for T {}

/// Log an error with format arguments
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logging::LoggerExt::error_fmt(&*$logger, format_args!($($arg)*))
    };
}
