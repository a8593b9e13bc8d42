//! hpclog Core
//!
//! Process-wide, rank-aware leveled logging for numerical and HPC libraries.
//! One logger per process decides, for every call, whether this process's
//! rank is the one that should speak and whether the message level is
//! enabled, then writes `"[<rank>] "`-prefixed lines to the console, a file,
//! or both.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use hpclog_core::{LogDestination, LogLevel, LoggerSettings};
//!
//! hpclog_core::initialize(
//!     LoggerSettings::new(LogLevel::Info, LogDestination::Both, "solver.log")
//!         .with_target_rank(0),
//! )?;
//!
//! hpclog_core::info("assembling system")?;
//! hpclog_core::basic_fmt("iteration {:>4}: residual {:.3e}", &[12.into(), 4.2e-9.into()])?;
//! hpclog_core::hpclog_debug!("rhs norm {}", 1.0_f64)?;
//! hpclog_core::finalize()?;
//! # Ok::<(), hpclog_core::LogError>(())
//! ```
//!
//! ## Multi-process runs
//!
//! The rank comes from a [`RankResolver`]. Without one the logger behaves as
//! rank 0 of a single process. Hosts with an MPI binding either implement the
//! trait over it or install a [`FixedRankResolver`] with the values they
//! already know.

pub mod config;
pub mod destination;
pub mod error;
pub mod format;
pub mod level;
pub mod logging;
pub mod rank;
pub mod sink;

// Re-export commonly used types
pub use config::{ConfigError, ConfigResult, LoggerSettings, UninitializedPolicy};
pub use destination::LogDestination;
pub use error::{LogError, LogResult, RankTargetError, RenderError, RenderErrorKind};
pub use format::FormatArg;
pub use level::LogLevel;
pub use logging::{Logger, LoggerCore, LoggerExt, NoOpLogger, RankUpdate, SharedLogger};
pub use rank::{Communicator, FixedRankResolver, RankResolver, SerialResolver, SharedResolver};

// Process-wide logger
pub use logging::global::{
    basic, basic_fmt, basic_on_rank, debug, debug_fmt, debug_on_rank, error, error_fmt,
    error_on_rank, finalize, global, info, info_fmt, info_on_rank, initialize, is_initialized,
    log, log_args, log_fmt, log_fmt_on_rank, log_on_rank, log_values, set_color, set_communicator,
    set_console, set_logging_level, set_logging_rank, set_output_filename, set_output_stream,
    set_rank_resolver, set_silence_warnings, set_uninitialized_policy, shared, warning,
    warning_fmt, warning_on_rank,
};
