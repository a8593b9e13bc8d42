//! Build-time defaults
//!
//! - feature `disable-logging`: every call is a no-op
//! - feature `silence-warnings`: warning-kind messages are dropped
//! - env `HPCLOG_DEFAULT_LEVEL` at build time: level used until configured

use crate::level::LogLevel;

/// `false` when built with the `disable-logging` feature
pub const LOGGING_ENABLED: bool = !cfg!(feature = "disable-logging");

/// `true` when built with the `silence-warnings` feature
pub const WARNINGS_SILENCED: bool = cfg!(feature = "silence-warnings");

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "hpclog.log";

const BUILD_DEFAULT_LEVEL: Option<&str> = option_env!("HPCLOG_DEFAULT_LEVEL");

/// Level in effect before any configuration is applied
///
/// `None` when logging is compiled out, otherwise the build-time
/// `HPCLOG_DEFAULT_LEVEL` if it parses, otherwise `Basic`.
pub fn default_level() -> LogLevel {
    if !LOGGING_ENABLED {
        return LogLevel::None;
    }
    BUILD_DEFAULT_LEVEL
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogLevel::Basic)
}
