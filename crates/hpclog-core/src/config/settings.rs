//! Logger settings
//!
//! Settings come from code, a YAML file (user-level
//! `~/.config/hpclog/config.yaml` or any path) and `HPCLOG_*` environment
//! variables, in that order of increasing precedence when combined.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::destination::LogDestination;
use crate::level::LogLevel;
use crate::rank::Communicator;

use super::defaults::{default_level, DEFAULT_LOG_FILE, WARNINGS_SILENCED};

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// What to do when the logger is used before `initialize()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UninitializedPolicy {
    /// Write one notice to the console, then drop messages silently
    #[default]
    WarnOnce,
    /// Drop messages without any notice
    Silent,
}

/// Configuration applied by `initialize()`
///
/// # Example
///
/// ```
/// use hpclog_core::{LogDestination, LogLevel, LoggerSettings};
///
/// let settings = LoggerSettings::new(LogLevel::Debug, LogDestination::Both, "solver.log")
///     .with_target_rank(1);
/// assert_eq!(settings.target_rank, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub level: LogLevel,
    pub destination: LogDestination,
    pub file_path: PathBuf,
    pub target_rank: usize,
    /// Colorize WARNING/ERROR lines on the console (needs the `color` feature)
    pub color: bool,
    pub silence_warnings: bool,
    pub uninitialized: UninitializedPolicy,
    /// Runtime handle, never read from files
    #[serde(skip)]
    pub communicator: Communicator,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            destination: LogDestination::Console,
            file_path: PathBuf::from(DEFAULT_LOG_FILE),
            target_rank: 0,
            color: false,
            silence_warnings: WARNINGS_SILENCED,
            uninitialized: UninitializedPolicy::WarnOnce,
            communicator: Communicator::WORLD,
        }
    }
}

impl LoggerSettings {
    pub fn new(level: LogLevel, destination: LogDestination, file_path: impl Into<PathBuf>) -> Self {
        Self {
            level,
            destination,
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    pub fn with_target_rank(mut self, rank: usize) -> Self {
        self.target_rank = rank;
        self
    }

    pub fn with_communicator(mut self, communicator: Communicator) -> Self {
        self.communicator = communicator;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_silence_warnings(mut self, silence: bool) -> Self {
        self.silence_warnings = silence;
        self
    }

    pub fn with_uninitialized_policy(mut self, policy: UninitializedPolicy) -> Self {
        self.uninitialized = policy;
        self
    }

    /// Parse settings from YAML; missing keys keep their defaults
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load settings from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// User-level settings file (`~/.config/hpclog/config.yaml` on Linux)
    pub fn user_config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        config_dir.join("hpclog").join("config.yaml")
    }

    /// Load the user-level file, or defaults if it does not exist
    pub fn load_user() -> ConfigResult<Self> {
        let path = Self::user_config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_yaml_file(path)
    }

    /// Apply `HPCLOG_LEVEL`, `HPCLOG_DESTINATION`, `HPCLOG_FILE`,
    /// `HPCLOG_RANK` and `HPCLOG_COLOR` from the process environment
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply `HPCLOG_*` overrides from an arbitrary lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("HPCLOG_LEVEL") {
            self.level = level.parse()?;
        }
        if let Some(destination) = lookup("HPCLOG_DESTINATION") {
            self.destination = destination.parse()?;
        }
        if let Some(file) = lookup("HPCLOG_FILE") {
            self.file_path = PathBuf::from(file);
        }
        if let Some(rank) = lookup("HPCLOG_RANK") {
            self.target_rank = rank
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_value("HPCLOG_RANK", rank.as_str()))?;
        }
        if let Some(color) = lookup("HPCLOG_COLOR") {
            self.color = parse_flag("HPCLOG_COLOR", &color)?;
        }
        Ok(self)
    }
}

fn parse_flag(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_value(key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = LoggerSettings::default();
        assert_eq!(settings.destination, LogDestination::Console);
        assert_eq!(settings.file_path, PathBuf::from("hpclog.log"));
        assert_eq!(settings.target_rank, 0);
        assert_eq!(settings.communicator, Communicator::WORLD);
        assert_eq!(settings.uninitialized, UninitializedPolicy::WarnOnce);
    }

    #[test]
    fn test_yaml_partial() {
        let settings = LoggerSettings::from_yaml_str(
            "level: debug\ndestination: both\nfile_path: out/solver.log\nuninitialized: silent\n",
        )
        .unwrap();
        assert_eq!(settings.level, LogLevel::Debug);
        assert_eq!(settings.destination, LogDestination::Both);
        assert_eq!(settings.file_path, PathBuf::from("out/solver.log"));
        assert_eq!(settings.uninitialized, UninitializedPolicy::Silent);
        assert_eq!(settings.target_rank, 0);
    }

    #[test]
    fn test_yaml_sparse_alias() {
        let settings = LoggerSettings::from_yaml_str("level: sparse").unwrap();
        assert_eq!(settings.level, LogLevel::Basic);
    }

    #[test]
    fn test_yaml_invalid() {
        let err = LoggerSettings::from_yaml_str("level: loud").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let settings = LoggerSettings::new(LogLevel::Info, LogDestination::File, "x.log").with_target_rank(2);

        fs::write(&path, settings.to_yaml().unwrap()).unwrap();
        let loaded = LoggerSettings::from_yaml_file(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = LoggerSettings::from_yaml_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_env_overrides() {
        let settings = LoggerSettings::default()
            .with_overrides_from(env(&[
                ("HPCLOG_LEVEL", "info"),
                ("HPCLOG_DESTINATION", "file"),
                ("HPCLOG_FILE", "/tmp/run.log"),
                ("HPCLOG_RANK", "3"),
                ("HPCLOG_COLOR", "yes"),
            ]))
            .unwrap();
        assert_eq!(settings.level, LogLevel::Info);
        assert_eq!(settings.destination, LogDestination::File);
        assert_eq!(settings.file_path, PathBuf::from("/tmp/run.log"));
        assert_eq!(settings.target_rank, 3);
        assert!(settings.color);
    }

    #[test]
    fn test_env_invalid_value() {
        let err = LoggerSettings::default()
            .with_overrides_from(env(&[("HPCLOG_RANK", "first")]))
            .unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value } => {
                assert_eq!(key, "HPCLOG_RANK");
                assert_eq!(value, "first");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_user_config_path() {
        let path = LoggerSettings::user_config_path();
        assert!(path.ends_with("hpclog/config.yaml"));
    }
}
