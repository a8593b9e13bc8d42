//! Error types

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by logging calls
#[derive(Error, Debug)]
pub enum LogError {
    /// Template/argument mismatch while building the message
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Writing to the console stream failed
    #[error("console write failed: {0}")]
    Console(#[source] std::io::Error),

    /// Appending to the log file failed
    #[error("cannot append to log file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LogError {
    /// Create a file sink error
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

pub type LogResult<T> = Result<T, LogError>;

/// Why a template could not be rendered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderErrorKind {
    #[error("unmatched '}}' at byte {0}")]
    UnmatchedClose(usize),

    #[error("unterminated replacement field starting at byte {0}")]
    Unterminated(usize),

    #[error("invalid format spec '{0}'")]
    InvalidSpec(String),

    #[error("argument index {index} out of range ({count} given)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("{unused} argument(s) not consumed by the template")]
    UnusedArguments { unused: usize },

    #[error("format '{spec}' is not supported for {arg_type} argument")]
    Incompatible { spec: String, arg_type: &'static str },
}

/// A template that failed to render, with everything needed to find the call site
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub template: String,
    pub args: Vec<String>,
    pub kind: RenderErrorKind,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to render {:?} with arguments [{}]: {}",
            self.template,
            self.args.join(", "),
            self.kind
        )
    }
}

/// Rejected change of the target rank
///
/// Never returned as an `Err`: the logger warns and keeps the previous target.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTargetError {
    #[error("Cannot target rank {requested} (current communicator size is {size}).")]
    OutOfRange { requested: usize, size: usize },

    #[error("Cannot set target rank (distributed runtime is not active).")]
    RuntimeInactive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_carries_template_and_args() {
        let err = RenderError {
            template: "value {:x}".to_string(),
            args: vec!["abc".to_string()],
            kind: RenderErrorKind::Incompatible {
                spec: "x".to_string(),
                arg_type: "text",
            },
        };
        let msg = LogError::from(err).to_string();
        assert!(msg.contains("\"value {:x}\""));
        assert!(msg.contains("[abc]"));
        assert!(msg.contains("not supported for text"));
    }

    #[test]
    fn test_rank_target_messages() {
        let err = RankTargetError::OutOfRange { requested: 5, size: 3 };
        assert_eq!(err.to_string(), "Cannot target rank 5 (current communicator size is 3).");
        assert!(RankTargetError::RuntimeInactive.to_string().contains("not active"));
    }

    #[test]
    fn test_file_error_names_path() {
        let err = LogError::file("/nope/out.log", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(err.to_string().contains("/nope/out.log"));
    }
}
