//! Console sink

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Writes composed lines to a console stream (stdout by default)
pub struct ConsoleSink {
    out: Box<dyn Write + Send>,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSink").finish_non_exhaustive()
    }
}

impl ConsoleSink {
    /// Console sink on the process's standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Console sink on any writer, e.g. a host's redirected stream
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self { out: Box::new(out) }
    }

    /// Write `line` followed by a newline and flush
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }
}

/// Clonable in-memory writer for capturing console output
///
/// # Example
///
/// ```
/// use hpclog_core::sink::{CaptureBuffer, ConsoleSink};
///
/// let buffer = CaptureBuffer::new();
/// let mut sink = ConsoleSink::new(buffer.clone());
/// sink.write_line("[0] hello").unwrap();
/// assert_eq!(buffer.contents(), "[0] hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Drain and return everything written so far
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.bytes.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_sink_appends_newline() {
        let buffer = CaptureBuffer::new();
        let mut sink = ConsoleSink::new(buffer.clone());
        sink.write_line("one").unwrap();
        sink.write_line("two").unwrap();
        assert_eq!(buffer.contents(), "one\ntwo\n");
    }

    #[test]
    fn test_capture_take_drains() {
        let buffer = CaptureBuffer::new();
        let mut sink = ConsoleSink::new(buffer.clone());
        sink.write_line("x").unwrap();
        assert_eq!(buffer.take(), "x\n");
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn test_write_failure_surfaces() {
        let mut sink = ConsoleSink::new(BrokenPipe);
        let err = sink.write_line("lost").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_stdout_sink_logs() {
        // Just make sure it doesn't panic
        let mut sink = ConsoleSink::stdout();
        sink.write_line("console sink smoke test").unwrap();
    }
}
