//! No-op logger implementation

use super::traits::Logger;
use crate::error::LogResult;
use crate::level::LogLevel;

/// A logger that does nothing
///
/// Useful for testing components that take a `SharedLogger`, or when logging
/// is not needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    /// Create a new no-op logger
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _message: &str) -> LogResult<()> {
        Ok(())
    }
}
