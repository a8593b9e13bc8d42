//! Output destinations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Where emitted lines go
///
/// The ordering `Console < File < Both` only exists to derive the two sink
/// switches; it is not a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogDestination {
    #[default]
    Console,
    File,
    Both,
}

impl LogDestination {
    pub fn should_print(self) -> bool {
        matches!(self, LogDestination::Console | LogDestination::Both)
    }

    pub fn should_write(self) -> bool {
        self >= LogDestination::File
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogDestination::Console => "console",
            LogDestination::File => "file",
            LogDestination::Both => "both",
        }
    }
}

impl fmt::Display for LogDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogDestination {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" | "stdout" => Ok(LogDestination::Console),
            "file" => Ok(LogDestination::File),
            "both" => Ok(LogDestination::Both),
            _ => Err(ConfigError::invalid_value("destination", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_switches() {
        assert!(LogDestination::Console.should_print());
        assert!(!LogDestination::Console.should_write());

        assert!(!LogDestination::File.should_print());
        assert!(LogDestination::File.should_write());

        assert!(LogDestination::Both.should_print());
        assert!(LogDestination::Both.should_write());
    }

    #[test]
    fn test_parse_destination() {
        assert_eq!("Both".parse::<LogDestination>().unwrap(), LogDestination::Both);
        assert_eq!("stdout".parse::<LogDestination>().unwrap(), LogDestination::Console);
        assert!("syslog".parse::<LogDestination>().is_err());
    }
}
