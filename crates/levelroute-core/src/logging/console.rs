//! Console (stderr) diagnostic logger

use std::io::Write;

use super::traits::Logger;
use crate::types::Level;

/// Writes diagnostics to stderr as `<prefix> LEVEL: message`
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a console logger with the default `[levelroute]` prefix
    pub fn new() -> Self {
        Self {
            prefix: "[levelroute]".to_string(),
        }
    }

    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn line(&self, level: Level, message: &str) -> String {
        format!("{} {}: {}", self.prefix, level.as_str().to_uppercase(), message)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, message: &str) {
        // stderr failures have nowhere left to be reported
        let _ = writeln!(std::io::stderr().lock(), "{}", self.line(level, message));
    }
}
