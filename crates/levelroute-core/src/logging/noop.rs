//! No-op diagnostic logger

use super::traits::Logger;
use crate::types::Level;

/// A logger that discards every diagnostic
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn log(&self, _level: Level, _message: &str) {}
}
