//! Process-wide logger
//!
//! One `LoggerCore` per process, created on first access. The free functions
//! here forward to it so call sites can log without threading a handle
//! through; components that prefer a handle take `shared()`.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::logger::{LoggerCore, RankUpdate};
use super::traits::{LoggerExt, SharedLogger};
use crate::config::{LoggerSettings, UninitializedPolicy};
use crate::destination::LogDestination;
use crate::error::LogResult;
use crate::format::FormatArg;
use crate::level::LogLevel;
use crate::rank::{Communicator, SharedResolver};
use crate::sink::ConsoleSink;

static GLOBAL_LOGGER: Lazy<Arc<LoggerCore>> = Lazy::new(|| Arc::new(LoggerCore::new()));

/// The process-wide logger
pub fn global() -> Arc<LoggerCore> {
    Arc::clone(&GLOBAL_LOGGER)
}

/// The process-wide logger as a `Logger` trait object
pub fn shared() -> SharedLogger {
    global()
}

/// Initialize the process-wide logger; later calls are no-ops
pub fn initialize(settings: LoggerSettings) -> LogResult<()> {
    GLOBAL_LOGGER.initialize(settings)
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.is_initialized()
}

pub fn finalize() -> LogResult<()> {
    GLOBAL_LOGGER.finalize()
}

pub fn log(level: LogLevel, message: &str) -> LogResult<()> {
    GLOBAL_LOGGER.log(level, message)
}

pub fn log_on_rank(level: LogLevel, message: &str, rank: usize) -> LogResult<()> {
    GLOBAL_LOGGER.log_on_rank(level, message, rank)
}

pub fn log_fmt(level: LogLevel, template: &str, args: &[FormatArg]) -> LogResult<()> {
    GLOBAL_LOGGER.log_fmt(level, template, args)
}

pub fn log_fmt_on_rank(level: LogLevel, template: &str, args: &[FormatArg], rank: usize) -> LogResult<()> {
    GLOBAL_LOGGER.log_fmt_on_rank(level, template, args, rank)
}

pub fn log_values(level: LogLevel, args: &[FormatArg]) -> LogResult<()> {
    GLOBAL_LOGGER.log_values(level, args)
}

/// Log `format_args!` output; used by the `hpclog_*!` macros
pub fn log_args(level: LogLevel, args: fmt::Arguments<'_>) -> LogResult<()> {
    GLOBAL_LOGGER.log_args(level, args)
}

macro_rules! leveled_functions {
    ($($level:ident => $plain:ident, $fmt:ident, $on_rank:ident;)*) => {
        $(
            #[doc = concat!("Log `message` at `", stringify!($level), "`")]
            pub fn $plain(message: &str) -> LogResult<()> {
                GLOBAL_LOGGER.log(LogLevel::$level, message)
            }

            #[doc = concat!("Render `template` and log it at `", stringify!($level), "`")]
            pub fn $fmt(template: &str, args: &[FormatArg]) -> LogResult<()> {
                GLOBAL_LOGGER.log_fmt(LogLevel::$level, template, args)
            }

            #[doc = concat!("Log at `", stringify!($level), "` on `rank` for this call only")]
            pub fn $on_rank(message: &str, rank: usize) -> LogResult<()> {
                GLOBAL_LOGGER.log_on_rank(LogLevel::$level, message, rank)
            }
        )*
    };
}

leveled_functions! {
    Basic => basic, basic_fmt, basic_on_rank;
    Info => info, info_fmt, info_on_rank;
    Debug => debug, debug_fmt, debug_on_rank;
    Warning => warning, warning_fmt, warning_on_rank;
    Error => error, error_fmt, error_on_rank;
}

pub fn set_logging_level(level: LogLevel) {
    GLOBAL_LOGGER.set_logging_level(level)
}

pub fn set_output_stream(destination: LogDestination) {
    GLOBAL_LOGGER.set_output_stream(destination)
}

pub fn set_output_filename(path: impl Into<PathBuf>) {
    GLOBAL_LOGGER.set_output_filename(path)
}

pub fn set_logging_rank(rank: usize) -> LogResult<RankUpdate> {
    GLOBAL_LOGGER.set_logging_rank(rank)
}

pub fn set_communicator(communicator: Communicator) {
    GLOBAL_LOGGER.set_communicator(communicator)
}

pub fn set_rank_resolver(resolver: SharedResolver) {
    GLOBAL_LOGGER.set_rank_resolver(resolver)
}

pub fn set_console(console: ConsoleSink) {
    GLOBAL_LOGGER.set_console(console)
}

pub fn set_color(color: bool) {
    GLOBAL_LOGGER.set_color(color)
}

pub fn set_silence_warnings(silence: bool) {
    GLOBAL_LOGGER.set_silence_warnings(silence)
}

pub fn set_uninitialized_policy(policy: UninitializedPolicy) {
    GLOBAL_LOGGER.set_uninitialized_policy(policy)
}

/// Format and log at `Basic` through the process-wide logger
#[macro_export]
macro_rules! hpclog_basic {
    ($($arg:tt)*) => {
        $crate::logging::global::log_args($crate::LogLevel::Basic, format_args!($($arg)*))
    };
}

/// Format and log at `Info` through the process-wide logger
#[macro_export]
macro_rules! hpclog_info {
    ($($arg:tt)*) => {
        $crate::logging::global::log_args($crate::LogLevel::Info, format_args!($($arg)*))
    };
}

/// Format and log at `Debug` through the process-wide logger
#[macro_export]
macro_rules! hpclog_debug {
    ($($arg:tt)*) => {
        $crate::logging::global::log_args($crate::LogLevel::Debug, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! hpclog_warning {
    ($($arg:tt)*) => {
        $crate::logging::global::log_args($crate::LogLevel::Warning, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! hpclog_error {
    ($($arg:tt)*) => {
        $crate::logging::global::log_args($crate::LogLevel::Error, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global logger is shared by every test in this binary, so these
    // tests only observe it; lifecycle tests live in tests/.

    #[test]
    fn test_global_is_one_instance() {
        assert!(Arc::ptr_eq(&global(), &global()));
    }

    #[test]
    fn test_shared_points_at_global() {
        let shared = shared();
        let global: SharedLogger = global();
        assert!(std::ptr::eq(
            Arc::as_ptr(&shared) as *const (),
            Arc::as_ptr(&global) as *const ()
        ));
    }
}
