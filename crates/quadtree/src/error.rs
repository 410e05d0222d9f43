//! Quadtree error types.

use thiserror::Error;

/// Errors that can occur while building a tree.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QuadTreeError {
    #[error("Empty initial point collection")]
    EmptyInput,

    #[error("Bucket capacity must be at least 1")]
    InvalidCapacity,
}

pub type Result<T> = std::result::Result<T, QuadTreeError>;
