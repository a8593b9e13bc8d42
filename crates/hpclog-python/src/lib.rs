//! Python bindings for hpclog via PyO3
//!
//! Every function operates on the process-wide logger, so a Python host and
//! the native library it drives share one configuration and one output.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

use hpclog_core::{
    ConfigError, FixedRankResolver, LogDestination as CoreLogDestination, LogError,
    LogLevel as CoreLogLevel, LoggerSettings,
};

// ============================================================================
// Error mapping
// ============================================================================

fn log_err(err: LogError) -> PyErr {
    match err {
        LogError::Render(_) => PyValueError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

fn config_err(err: ConfigError) -> PyErr {
    match err {
        ConfigError::Io(_) => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Logging level enum
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogLevel {
    #[pyo3(name = "NONE")]
    None,
    #[pyo3(name = "BASIC")]
    Basic,
    #[pyo3(name = "INFO")]
    Info,
    #[pyo3(name = "DEBUG")]
    Debug,
    #[pyo3(name = "WARNING")]
    Warning,
    #[pyo3(name = "ERROR")]
    Error,
}

#[pymethods]
impl LogLevel {
    /// Parse "none", "basic" (or "sparse"), "info", "debug", "warning", "error"
    #[staticmethod]
    fn parse(value: &str) -> PyResult<Self> {
        value
            .parse::<CoreLogLevel>()
            .map(Into::into)
            .map_err(config_err)
    }

    fn __repr__(&self) -> String {
        format!("LogLevel.{}", CoreLogLevel::from(*self).as_str().to_uppercase())
    }
}

impl From<CoreLogLevel> for LogLevel {
    fn from(level: CoreLogLevel) -> Self {
        match level {
            CoreLogLevel::None => LogLevel::None,
            CoreLogLevel::Basic => LogLevel::Basic,
            CoreLogLevel::Info => LogLevel::Info,
            CoreLogLevel::Debug => LogLevel::Debug,
            CoreLogLevel::Warning => LogLevel::Warning,
            CoreLogLevel::Error => LogLevel::Error,
        }
    }
}

impl From<LogLevel> for CoreLogLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::None => CoreLogLevel::None,
            LogLevel::Basic => CoreLogLevel::Basic,
            LogLevel::Info => CoreLogLevel::Info,
            LogLevel::Debug => CoreLogLevel::Debug,
            LogLevel::Warning => CoreLogLevel::Warning,
            LogLevel::Error => CoreLogLevel::Error,
        }
    }
}

/// Output destination enum
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogDestination {
    #[pyo3(name = "CONSOLE")]
    Console,
    #[pyo3(name = "FILE")]
    File,
    #[pyo3(name = "BOTH")]
    Both,
}

#[pymethods]
impl LogDestination {
    /// Parse "console" (or "stdout"), "file", "both"
    #[staticmethod]
    fn parse(value: &str) -> PyResult<Self> {
        value
            .parse::<CoreLogDestination>()
            .map(Into::into)
            .map_err(config_err)
    }

    fn __repr__(&self) -> String {
        format!("LogDestination.{}", CoreLogDestination::from(*self).as_str().to_uppercase())
    }
}

impl From<CoreLogDestination> for LogDestination {
    fn from(destination: CoreLogDestination) -> Self {
        match destination {
            CoreLogDestination::Console => LogDestination::Console,
            CoreLogDestination::File => LogDestination::File,
            CoreLogDestination::Both => LogDestination::Both,
        }
    }
}

impl From<LogDestination> for CoreLogDestination {
    fn from(destination: LogDestination) -> Self {
        match destination {
            LogDestination::Console => CoreLogDestination::Console,
            LogDestination::File => CoreLogDestination::File,
            LogDestination::Both => CoreLogDestination::Both,
        }
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Configure the process-wide logger; only the first call has any effect
#[pyfunction]
#[pyo3(signature = (level, destination, filename, rank=0))]
pub fn initialize(
    level: LogLevel,
    destination: LogDestination,
    filename: PathBuf,
    rank: usize,
) -> PyResult<()> {
    let settings = LoggerSettings::new(level.into(), destination.into(), filename).with_target_rank(rank);
    hpclog_core::initialize(settings).map_err(log_err)
}

/// Configure from a YAML file (user config when omitted) plus HPCLOG_* variables
#[pyfunction]
#[pyo3(signature = (path=None))]
pub fn initialize_from_config(path: Option<PathBuf>) -> PyResult<()> {
    let settings = match path {
        Some(path) => LoggerSettings::from_yaml_file(path),
        None => LoggerSettings::load_user(),
    }
    .and_then(LoggerSettings::with_env_overrides)
    .map_err(config_err)?;
    hpclog_core::initialize(settings).map_err(log_err)
}

#[pyfunction]
pub fn is_initialized() -> bool {
    hpclog_core::is_initialized()
}

#[pyfunction]
pub fn finalize() -> PyResult<()> {
    hpclog_core::finalize().map_err(log_err)
}

// ============================================================================
// Logging calls
// ============================================================================

fn emit(level: CoreLogLevel, message: &str, rank: Option<usize>) -> PyResult<()> {
    let result = match rank {
        Some(rank) => hpclog_core::log_on_rank(level, message, rank),
        None => hpclog_core::log(level, message),
    };
    result.map_err(log_err)
}

#[pyfunction]
#[pyo3(signature = (message, rank=None))]
pub fn basic(message: &str, rank: Option<usize>) -> PyResult<()> {
    emit(CoreLogLevel::Basic, message, rank)
}

#[pyfunction]
#[pyo3(signature = (message, rank=None))]
pub fn info(message: &str, rank: Option<usize>) -> PyResult<()> {
    emit(CoreLogLevel::Info, message, rank)
}

#[pyfunction]
#[pyo3(signature = (message, rank=None))]
pub fn debug(message: &str, rank: Option<usize>) -> PyResult<()> {
    emit(CoreLogLevel::Debug, message, rank)
}

#[pyfunction]
#[pyo3(signature = (message, rank=None))]
pub fn warning(message: &str, rank: Option<usize>) -> PyResult<()> {
    emit(CoreLogLevel::Warning, message, rank)
}

#[pyfunction]
#[pyo3(signature = (message, rank=None))]
pub fn error(message: &str, rank: Option<usize>) -> PyResult<()> {
    emit(CoreLogLevel::Error, message, rank)
}

// ============================================================================
// Settings
// ============================================================================

#[pyfunction]
pub fn set_level(level: LogLevel) {
    hpclog_core::set_logging_level(level.into());
}

#[pyfunction]
pub fn get_level() -> LogLevel {
    hpclog_core::global().level().into()
}

#[pyfunction]
pub fn set_output_stream(destination: LogDestination) {
    hpclog_core::set_output_stream(destination.into());
}

#[pyfunction]
pub fn set_output_filename(filename: PathBuf) {
    hpclog_core::set_output_filename(filename);
}

/// Change the target rank; returns False when the change was rejected
#[pyfunction]
pub fn set_logging_rank(rank: usize) -> PyResult<bool> {
    hpclog_core::set_logging_rank(rank)
        .map(|update| update.is_applied())
        .map_err(log_err)
}

/// Use rank/size obtained from the host's own MPI binding (e.g. mpi4py)
#[pyfunction]
pub fn use_fixed_group(rank: usize, size: usize) -> PyResult<()> {
    if rank >= size {
        return Err(PyValueError::new_err(format!(
            "rank {rank} is outside a group of size {size}"
        )));
    }
    hpclog_core::set_rank_resolver(Arc::new(FixedRankResolver::new(rank, size)));
    Ok(())
}

// ============================================================================
// Module
// ============================================================================

#[pymodule]
fn hpclog(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Enums
    m.add_class::<LogLevel>()?;
    m.add_class::<LogDestination>()?;

    // Lifecycle
    m.add_function(wrap_pyfunction!(initialize, m)?)?;
    m.add_function(wrap_pyfunction!(initialize_from_config, m)?)?;
    m.add_function(wrap_pyfunction!(is_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(finalize, m)?)?;

    // Logging calls
    m.add_function(wrap_pyfunction!(basic, m)?)?;
    m.add_function(wrap_pyfunction!(info, m)?)?;
    m.add_function(wrap_pyfunction!(debug, m)?)?;
    m.add_function(wrap_pyfunction!(warning, m)?)?;
    m.add_function(wrap_pyfunction!(error, m)?)?;

    // Settings
    m.add_function(wrap_pyfunction!(set_level, m)?)?;
    m.add_function(wrap_pyfunction!(get_level, m)?)?;
    m.add_function(wrap_pyfunction!(set_output_stream, m)?)?;
    m.add_function(wrap_pyfunction!(set_output_filename, m)?)?;
    m.add_function(wrap_pyfunction!(set_logging_rank, m)?)?;
    m.add_function(wrap_pyfunction!(use_fixed_group, m)?)?;

    Ok(())
}
