//! Logger configuration
//!
//! - `LoggerSettings`: what `initialize()` applies, loadable from YAML/env
//! - `defaults`: build-time switches (cargo features, `HPCLOG_DEFAULT_LEVEL`)

mod settings;
pub mod defaults;

pub use settings::{ConfigError, ConfigResult, LoggerSettings, UninitializedPolicy};
