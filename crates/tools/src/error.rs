//! Tool error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing point data.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
}
