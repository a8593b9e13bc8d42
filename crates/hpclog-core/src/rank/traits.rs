//! Rank resolver trait and communicator handle

use std::fmt;

/// Opaque handle to a process group
///
/// Wraps whatever integer or pointer value the host's messaging runtime uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Communicator(u64);

impl Communicator {
    /// The group of all processes
    pub const WORLD: Communicator = Communicator(0);

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Communicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::WORLD {
            f.write_str("WORLD")
        } else {
            write!(f, "comm#{}", self.0)
        }
    }
}

/// Where the current process sits inside a process group
///
/// Implementations:
/// - `SerialResolver`: single process, always rank 0 of 1
/// - `FixedRankResolver`: rank/size supplied by the host
/// - Host adapters over an MPI binding
///
/// The logger re-queries after every communicator change and never assumes
/// the rank is stable across swaps.
pub trait RankResolver: Send + Sync {
    /// Rank of this process within `comm`
    fn current_rank(&self, comm: Communicator) -> usize;

    /// Number of processes in `comm`
    fn group_size(&self, comm: Communicator) -> usize;

    /// Whether a distributed runtime is up
    ///
    /// When `false` rank filtering is off and every call matches.
    fn is_distributed_runtime_active(&self) -> bool;
}
