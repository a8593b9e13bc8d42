//! Logging levels
//!
//! `None`, `Basic`, `Info` and `Debug` are verbosity tiers. `Warning` and
//! `Error` are message kinds: they sit above `Debug` in the ordering so a
//! threshold set to either of them still emits everything, but a message
//! logged at one of them is gated by [`LogLevel::INFORMATIONAL`] rather than by
//! its own slot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    None = 0,
    #[serde(alias = "sparse")]
    Basic = 1,
    Info = 2,
    Debug = 3,
    Warning = 4,
    Error = 5,
}

impl LogLevel {
    /// Minimum configured level at which warnings and errors become visible
    pub const INFORMATIONAL: LogLevel = LogLevel::Info;

    /// Whether this is a message kind (warning/error) rather than a tier
    pub fn is_kind(self) -> bool {
        matches!(self, LogLevel::Warning | LogLevel::Error)
    }

    /// Tag placed in front of kind messages
    pub fn kind_prefix(self) -> &'static str {
        match self {
            LogLevel::Warning => "WARNING: ",
            LogLevel::Error => "ERROR: ",
            _ => "",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::None => "none",
            LogLevel::Basic => "basic",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }

    /// Whether a message at `message_level` passes when the threshold is `self`
    pub fn admits(self, message_level: LogLevel) -> bool {
        match message_level {
            LogLevel::None => false,
            LogLevel::Warning | LogLevel::Error => self >= Self::INFORMATIONAL,
            tier => self >= tier,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "0" => Ok(LogLevel::None),
            "basic" | "sparse" | "1" => Ok(LogLevel::Basic),
            "info" | "2" => Ok(LogLevel::Info),
            "debug" | "3" => Ok(LogLevel::Debug),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::invalid_value("level", s)),
        }
    }
}
