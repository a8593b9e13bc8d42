//! Append-only file sink
//!
//! No handle is kept between writes: every line opens the file in append
//! mode, writes and closes, so an abrupt exit never loses a buffered line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{LogError, LogResult};

/// Append `line` plus a newline to the file at `path`, creating it if needed
pub fn append_line(path: &Path, line: &str) -> LogResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogError::file(path, e))?;

    writeln!(file, "{}", line).map_err(|e| LogError::file(path, e))?;
    file.flush().map_err(|e| LogError::file(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_append_creates_and_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.log");

        append_line(&path, "[0] first").unwrap();
        append_line(&path, "[0] second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[0] first\n[0] second\n");
    }

    #[test]
    fn test_existing_content_preserved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.log");
        fs::write(&path, "previous run\n").unwrap();

        append_line(&path, "[1] next").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "previous run\n[1] next\n");
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("run.log");

        match append_line(&path, "dropped") {
            Err(LogError::File { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected file error, got {:?}", other),
        }
    }
}
