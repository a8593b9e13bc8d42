//! Output sinks
//!
//! Two independent actions, each switched by the configured destination:
//! printing to the console and appending to a file.

mod console;
mod file;

pub use console::{CaptureBuffer, ConsoleSink};
pub use file::append_line;
