//! Logging abstractions and the process-wide logger

mod traits;
mod noop;
mod logger;
pub mod global;

pub use traits::{Logger, LoggerExt, SharedLogger};
pub use noop::NoOpLogger;
pub use logger::{LoggerCore, RankUpdate};
