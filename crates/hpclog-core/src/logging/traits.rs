//! Logger trait definition

use std::fmt;
use std::sync::Arc;

use crate::error::LogResult;
use crate::format::{self, FormatArg};
use crate::level::LogLevel;

/// Logger abstraction handed to components that need to log
///
/// Implementations:
/// - `LoggerCore`: level/rank/destination aware logger (and the global one)
/// - `NoOpLogger`: silent logger for testing
///
/// Every call reports sink failures instead of dropping the line.
pub trait Logger: Send + Sync {
    /// Log a message at `level`
    fn log(&self, level: LogLevel, message: &str) -> LogResult<()>;

    /// Log a basic message
    fn basic(&self, message: &str) -> LogResult<()> {
        self.log(LogLevel::Basic, message)
    }

    /// Log an info message
    fn info(&self, message: &str) -> LogResult<()> {
        self.log(LogLevel::Info, message)
    }

    /// Log a debug message
    fn debug(&self, message: &str) -> LogResult<()> {
        self.log(LogLevel::Debug, message)
    }

    /// Log a warning, shown from the informational level up
    fn warning(&self, message: &str) -> LogResult<()> {
        self.log(LogLevel::Warning, message)
    }

    /// Log an error, shown from the informational level up
    fn error(&self, message: &str) -> LogResult<()> {
        self.log(LogLevel::Error, message)
    }
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

/// Extension trait for logging with format arguments
pub trait LoggerExt: Logger {
    /// Log compile-time checked `format_args!` output
    fn log_args(&self, level: LogLevel, args: fmt::Arguments<'_>) -> LogResult<()> {
        match args.as_str() {
            Some(message) => self.log(level, message),
            None => self.log(level, &args.to_string()),
        }
    }

    /// Log a runtime template; rendering errors are returned before filtering
    fn log_template(&self, level: LogLevel, template: &str, args: &[FormatArg]) -> LogResult<()> {
        let message = format::render(template, args)?;
        self.log(level, &message)
    }

    /// Log a basic message with format arguments
    fn basic_args(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log_args(LogLevel::Basic, args)
    }

    /// Log an info message with format arguments
    fn info_args(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log_args(LogLevel::Info, args)
    }

    /// Log a debug message with format arguments
    fn debug_args(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log_args(LogLevel::Debug, args)
    }

    /// Log a warning with format arguments
    fn warning_args(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log_args(LogLevel::Warning, args)
    }

    /// Log an error with format arguments
    fn error_args(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log_args(LogLevel::Error, args)
    }
}

// Implement LoggerExt for all Logger implementations
impl<T: Logger + ?Sized> LoggerExt for T {}
