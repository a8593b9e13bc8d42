//! Process rank resolution
//!
//! The logger only needs two numbers from a distributed runtime: this
//! process's rank and the size of its group. Resolvers provide them:
//! - `SerialResolver`: no runtime, rank 0 of 1 (default)
//! - `FixedRankResolver`: values supplied by the host
//! - Any host type implementing `RankResolver` over its MPI binding

mod traits;
mod serial;
mod fixed;

pub use traits::{Communicator, RankResolver};
pub use serial::SerialResolver;
pub use fixed::FixedRankResolver;

use std::sync::Arc;

/// Type alias for an Arc-wrapped resolver
pub type SharedResolver = Arc<dyn RankResolver>;
