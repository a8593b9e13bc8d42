//! Rank-aware logger
//!
//! `LoggerCore` decides whether a call is emitted and where. All state lives
//! behind one mutex that also covers the final write, so lines from different
//! threads never interleave and the derived sink switches and rank prefix are
//! never observed out of step with what they are derived from.
//!
//! Emission order for every call:
//! 1. not initialized: uninitialized policy, nothing else
//! 2. rank filter: with a distributed runtime active, the process rank must
//!    equal the target rank
//! 3. level filter: `None` never passes; warnings/errors need the
//!    informational level; tiers need `configured >= level`
//! 4. `"[<rank>] " + kind tag + message` to console and/or file

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use super::traits::Logger;
use crate::config::defaults::{default_level, LOGGING_ENABLED, WARNINGS_SILENCED};
use crate::config::{LoggerSettings, UninitializedPolicy};
use crate::destination::LogDestination;
use crate::error::{LogError, LogResult, RankTargetError};
use crate::format::{self, FormatArg};
use crate::level::LogLevel;
use crate::rank::{Communicator, SerialResolver, SharedResolver};
use crate::sink::{self, ConsoleSink};

const INITIALIZED_MESSAGE: &str = "hpclog initialized.";
const FINALIZED_MESSAGE: &str = "hpclog finalized.";
const UNINITIALIZED_NOTICE: &str =
    "WARNING: hpclog used before initialize(); messages are discarded until it is initialized.";

/// Outcome of a target rank change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankUpdate {
    Applied,
    /// Rejected; a warning was emitted and the previous target kept
    Rejected(RankTargetError),
}

impl RankUpdate {
    pub fn is_applied(&self) -> bool {
        matches!(self, RankUpdate::Applied)
    }
}

struct LoggerState {
    level: LogLevel,
    destination: LogDestination,
    should_print: bool,
    should_write: bool,
    file_path: PathBuf,
    current_rank: usize,
    target_rank: usize,
    rank_prefix: String,
    communicator: Communicator,
    resolver: SharedResolver,
    console: ConsoleSink,
    color: bool,
    silence_warnings: bool,
    uninitialized: UninitializedPolicy,
    initialized: bool,
    uninitialized_notice_sent: bool,
}

impl LoggerState {
    fn new(resolver: SharedResolver) -> Self {
        let defaults = LoggerSettings::default();
        let mut state = Self {
            level: default_level(),
            destination: defaults.destination,
            should_print: false,
            should_write: false,
            file_path: defaults.file_path,
            current_rank: 0,
            target_rank: 0,
            rank_prefix: String::new(),
            communicator: Communicator::WORLD,
            resolver,
            console: ConsoleSink::stdout(),
            color: false,
            silence_warnings: WARNINGS_SILENCED,
            uninitialized: defaults.uninitialized,
            initialized: false,
            uninitialized_notice_sent: false,
        };
        state.set_destination(defaults.destination);
        state.refresh_rank();
        state
    }

    fn set_level(&mut self, level: LogLevel) {
        self.level = if LOGGING_ENABLED { level } else { LogLevel::None };
    }

    fn set_destination(&mut self, destination: LogDestination) {
        self.destination = destination;
        self.should_print = destination.should_print();
        self.should_write = destination.should_write();
    }

    fn refresh_rank(&mut self) {
        self.current_rank = self.resolver.current_rank(self.communicator);
        self.rank_prefix = format!("[{}] ", self.current_rank);
    }

    fn distributed(&self) -> bool {
        self.resolver.is_distributed_runtime_active()
    }

    fn rank_matches(&self, target: usize) -> bool {
        !self.distributed() || self.current_rank == target
    }

    fn check_target(&self, rank: usize) -> Result<(), RankTargetError> {
        if !self.distributed() {
            return if rank == self.target_rank {
                Ok(())
            } else {
                Err(RankTargetError::RuntimeInactive)
            };
        }
        let size = self.resolver.group_size(self.communicator);
        if rank >= size {
            return Err(RankTargetError::OutOfRange { requested: rank, size });
        }
        Ok(())
    }

    fn retarget(&mut self, rank: usize) -> LogResult<RankUpdate> {
        match self.check_target(rank) {
            Ok(()) => {
                self.target_rank = rank;
                Ok(RankUpdate::Applied)
            }
            Err(err) => {
                self.diagnose(err)?;
                Ok(RankUpdate::Rejected(err))
            }
        }
    }

    fn apply(&mut self, settings: LoggerSettings) -> LogResult<()> {
        self.set_level(settings.level);
        self.set_destination(settings.destination);
        self.file_path = settings.file_path;
        self.color = settings.color;
        self.silence_warnings = settings.silence_warnings || WARNINGS_SILENCED;
        self.uninitialized = settings.uninitialized;
        self.communicator = settings.communicator;
        self.refresh_rank();
        self.initialized = true;

        let retargeted = self.retarget(settings.target_rank).map(|_| ());
        let target = self.target_rank;
        let announced = self.emit(LogLevel::Info, INITIALIZED_MESSAGE, target);
        retargeted.and(announced)
    }

    fn admits(&self, level: LogLevel) -> bool {
        if level == LogLevel::Warning && self.silence_warnings {
            return false;
        }
        self.level.admits(level)
    }

    fn note_uninitialized(&mut self) -> LogResult<()> {
        if self.uninitialized == UninitializedPolicy::Silent || self.uninitialized_notice_sent {
            return Ok(());
        }
        self.uninitialized_notice_sent = true;
        self.console
            .write_line(UNINITIALIZED_NOTICE)
            .map_err(LogError::Console)
    }

    fn emit(&mut self, level: LogLevel, message: &str, target: usize) -> LogResult<()> {
        if !self.initialized {
            return self.note_uninitialized();
        }
        if !self.rank_matches(target) || !self.admits(level) {
            return Ok(());
        }
        self.write(level, message)
    }

    /// Report a rejected configuration change on this process
    ///
    /// Level gated like any warning, but not rank gated.
    fn diagnose(&mut self, err: RankTargetError) -> LogResult<()> {
        if !self.admits(LogLevel::Warning) {
            return Ok(());
        }
        self.write(LogLevel::Warning, &err.to_string())
    }

    fn write(&mut self, level: LogLevel, message: &str) -> LogResult<()> {
        let tagged = format!("{}{}", level.kind_prefix(), message);
        let line = format!("{}{}", self.rank_prefix, tagged);

        if self.should_print {
            let printed = if self.color && level.is_kind() {
                format!("{}{}", self.rank_prefix, decorate(level, &tagged))
            } else {
                line.clone()
            };
            self.console.write_line(&printed).map_err(LogError::Console)?;
        }
        if self.should_write {
            sink::append_line(&self.file_path, &line)?;
        }
        Ok(())
    }
}

#[cfg(feature = "color")]
fn decorate(level: LogLevel, text: &str) -> String {
    use colored::Colorize;

    match level {
        LogLevel::Warning => text.yellow().to_string(),
        LogLevel::Error => text.red().to_string(),
        _ => text.to_string(),
    }
}

#[cfg(not(feature = "color"))]
fn decorate(_level: LogLevel, text: &str) -> String {
    text.to_string()
}

/// Level, destination and rank aware logger
///
/// Usually reached through the process-wide instance (`hpclog_core::global()`),
/// but independent instances are useful for embedding and tests.
///
/// # Example
///
/// ```
/// use hpclog_core::sink::{CaptureBuffer, ConsoleSink};
/// use hpclog_core::{LogDestination, LogLevel, Logger, LoggerCore, LoggerSettings};
///
/// let logger = LoggerCore::new();
/// let console = CaptureBuffer::new();
/// logger.set_console(ConsoleSink::new(console.clone()));
/// logger
///     .initialize(LoggerSettings::new(LogLevel::Info, LogDestination::Console, "run.log"))
///     .unwrap();
///
/// logger.info("assembling system").unwrap();
/// logger.log_fmt(LogLevel::Basic, "residual {:>8.2e}", &[1.5e-7_f64.into()]).unwrap();
///
/// let out = console.contents();
/// assert!(out.contains("[0] assembling system"));
/// assert!(out.contains("[0] residual  1.50e-7"));
/// ```
pub struct LoggerCore {
    init_gate: OnceCell<()>,
    state: Mutex<LoggerState>,
}

impl Default for LoggerCore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LoggerCore")
            .field("initialized", &state.initialized)
            .field("level", &state.level)
            .field("destination", &state.destination)
            .field("file_path", &state.file_path)
            .field("current_rank", &state.current_rank)
            .field("target_rank", &state.target_rank)
            .field("communicator", &state.communicator)
            .finish()
    }
}

impl LoggerCore {
    /// Create an uninitialized logger for a single-process run
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(SerialResolver::new()))
    }

    /// Create an uninitialized logger using `resolver` for rank queries
    pub fn with_resolver(resolver: SharedResolver) -> Self {
        Self {
            init_gate: OnceCell::new(),
            state: Mutex::new(LoggerState::new(resolver)),
        }
    }

    /// Apply `settings` once
    ///
    /// Only the first call in the lifetime of this logger has any effect.
    /// Concurrent first callers block until the winning call has applied its
    /// settings. The winning call announces itself at `Info`.
    pub fn initialize(&self, settings: LoggerSettings) -> LogResult<()> {
        let mut outcome = Ok(());
        self.init_gate.get_or_init(|| {
            outcome = self.state.lock().apply(settings);
        });
        outcome
    }

    pub fn is_initialized(&self) -> bool {
        self.init_gate.get().is_some()
    }

    /// Announce the end of logging; nothing is released
    pub fn finalize(&self) -> LogResult<()> {
        self.log(LogLevel::Info, FINALIZED_MESSAGE)
    }

    /// Log `message` on the configured target rank
    pub fn log(&self, level: LogLevel, message: &str) -> LogResult<()> {
        if !LOGGING_ENABLED {
            return Ok(());
        }
        let mut state = self.state.lock();
        let target = state.target_rank;
        state.emit(level, message, target)
    }

    /// Log `message` on `rank` for this call only
    ///
    /// An invalid `rank` is reported like a rejected `set_logging_rank` and
    /// the call falls back to the configured target.
    pub fn log_on_rank(&self, level: LogLevel, message: &str, rank: usize) -> LogResult<()> {
        if !LOGGING_ENABLED {
            return Ok(());
        }
        let mut state = self.state.lock();
        if !state.initialized {
            return state.note_uninitialized();
        }
        let target = match state.check_target(rank) {
            Ok(()) => rank,
            Err(err) => {
                state.diagnose(err)?;
                state.target_rank
            }
        };
        state.emit(level, message, target)
    }

    /// Render `template` with `args`, then log it
    ///
    /// Rendering happens before any filtering, so a bad template fails on
    /// every rank and at every level.
    pub fn log_fmt(&self, level: LogLevel, template: &str, args: &[FormatArg]) -> LogResult<()> {
        if !LOGGING_ENABLED {
            return Ok(());
        }
        let message = format::render(template, args)?;
        self.log(level, &message)
    }

    /// [`LoggerCore::log_fmt`] with a per-call target rank
    pub fn log_fmt_on_rank(
        &self,
        level: LogLevel,
        template: &str,
        args: &[FormatArg],
        rank: usize,
    ) -> LogResult<()> {
        if !LOGGING_ENABLED {
            return Ok(());
        }
        let message = format::render(template, args)?;
        self.log_on_rank(level, &message, rank)
    }

    /// Log `args` joined by single spaces
    pub fn log_values(&self, level: LogLevel, args: &[FormatArg]) -> LogResult<()> {
        if !LOGGING_ENABLED {
            return Ok(());
        }
        self.log(level, &format::join(args))
    }

    pub fn set_logging_level(&self, level: LogLevel) {
        self.state.lock().set_level(level);
    }

    /// Switch destination; both sink switches change together
    pub fn set_output_stream(&self, destination: LogDestination) {
        self.state.lock().set_destination(destination);
    }

    pub fn set_output_filename(&self, path: impl Into<PathBuf>) {
        self.state.lock().file_path = path.into();
    }

    /// Change the rank whose messages are emitted
    ///
    /// Rejected with a warning when the rank is outside the current group, or
    /// when no distributed runtime is active. Only `Err` if that warning could
    /// not be written.
    pub fn set_logging_rank(&self, rank: usize) -> LogResult<RankUpdate> {
        self.state.lock().retarget(rank)
    }

    /// Switch process group; the rank is queried again
    pub fn set_communicator(&self, communicator: Communicator) {
        let mut state = self.state.lock();
        state.communicator = communicator;
        state.refresh_rank();
    }

    /// Install a different rank resolver; the rank is queried again
    pub fn set_rank_resolver(&self, resolver: SharedResolver) {
        let mut state = self.state.lock();
        state.resolver = resolver;
        state.refresh_rank();
    }

    /// Replace the console stream
    pub fn set_console(&self, console: ConsoleSink) {
        self.state.lock().console = console;
    }

    pub fn set_color(&self, color: bool) {
        self.state.lock().color = color;
    }

    pub fn set_silence_warnings(&self, silence: bool) {
        self.state.lock().silence_warnings = silence || WARNINGS_SILENCED;
    }

    pub fn set_uninitialized_policy(&self, policy: UninitializedPolicy) {
        self.state.lock().uninitialized = policy;
    }

    pub fn level(&self) -> LogLevel {
        self.state.lock().level
    }

    pub fn destination(&self) -> LogDestination {
        self.state.lock().destination
    }

    pub fn file_path(&self) -> PathBuf {
        self.state.lock().file_path.clone()
    }

    pub fn target_rank(&self) -> usize {
        self.state.lock().target_rank
    }

    pub fn current_rank(&self) -> usize {
        self.state.lock().current_rank
    }

    pub fn communicator(&self) -> Communicator {
        self.state.lock().communicator
    }
}

impl Logger for LoggerCore {
    fn log(&self, level: LogLevel, message: &str) -> LogResult<()> {
        LoggerCore::log(self, level, message)
    }
}

macro_rules! leveled_forms {
    ($($level:ident => $fmt:ident, $on_rank:ident;)*) => {
        impl LoggerCore {
            $(
                #[doc = concat!("Render `template` and log it at `", stringify!($level), "`")]
                pub fn $fmt(&self, template: &str, args: &[FormatArg]) -> LogResult<()> {
                    self.log_fmt(LogLevel::$level, template, args)
                }

                #[doc = concat!("Log at `", stringify!($level), "` on `rank` for this call only")]
                pub fn $on_rank(&self, message: &str, rank: usize) -> LogResult<()> {
                    self.log_on_rank(LogLevel::$level, message, rank)
                }
            )*
        }
    };
}

leveled_forms! {
    Basic => basic_fmt, basic_on_rank;
    Info => info_fmt, info_on_rank;
    Debug => debug_fmt, debug_on_rank;
    Warning => warning_fmt, warning_on_rank;
    Error => error_fmt, error_on_rank;
}


#[cfg(all(test, feature = "disable-logging"))]
mod disabled_tests {
    use super::*;
    use crate::rank::FixedRankResolver;
    use crate::sink::CaptureBuffer;
    use tempfile::tempdir;

    #[test]
    fn test_every_call_is_a_no_op() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("never.log");
        let logger = LoggerCore::with_resolver(Arc::new(FixedRankResolver::new(0, 2)));
        let console = CaptureBuffer::new();
        logger.set_console(ConsoleSink::new(console.clone()));

        logger.basic("before init").unwrap();
        logger
            .initialize(LoggerSettings::new(LogLevel::Debug, LogDestination::Both, &path))
            .unwrap();
        assert_eq!(logger.level(), LogLevel::None);

        logger.set_logging_level(LogLevel::Debug);
        assert_eq!(logger.level(), LogLevel::None);

        logger.error("error").unwrap();
        logger.log_on_rank(LogLevel::Basic, "override", 0).unwrap();
        logger.log_values(LogLevel::Basic, &["a".into(), 1.into()]).unwrap();
        logger.set_logging_rank(9).unwrap();
        logger.finalize().unwrap();

        // Templates are not even rendered
        logger.log_fmt(LogLevel::Basic, "{} {}", &[1.into()]).unwrap();

        assert_eq!(console.contents(), "");
        assert!(!path.exists());
    }
}


#[cfg(all(test, feature = "color", not(any(feature = "disable-logging", feature = "silence-warnings"))))]
mod color_tests {
    use super::*;
    use crate::sink::CaptureBuffer;
    use colored::Colorize;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_console_colored_file_plain() {
        colored::control::set_override(true);

        let dir = tempdir().unwrap();
        let path = dir.path().join("colored.log");
        let logger = LoggerCore::new();
        let console = CaptureBuffer::new();
        logger.set_console(ConsoleSink::new(console.clone()));
        logger
            .initialize(
                LoggerSettings::new(LogLevel::Info, LogDestination::Both, &path).with_color(true),
            )
            .unwrap();
        console.clear();

        logger.warning("careful").unwrap();
        logger.error("diverged").unwrap();
        logger.info("plain").unwrap();

        let expected = format!(
            "[0] {}\n[0] {}\n[0] plain\n",
            "WARNING: careful".yellow(),
            "ERROR: diverged".red()
        );
        assert_eq!(console.contents(), expected);
        assert!(console.contents().contains("\u{1b}[33m"));
        assert!(console.contents().contains("\u{1b}[31m"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[0] hpclog initialized.\n[0] WARNING: careful\n[0] ERROR: diverged\n[0] plain\n"
        );
    }
}
