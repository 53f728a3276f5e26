//! Error types for graph coloring operations.

use thiserror::Error;

/// Unified error type for the coloring engine and its collaborators.
#[derive(Error, Debug)]
pub enum ColoringError {
    /// Input that violates an operation's contract: negative node count,
    /// out-of-range edge endpoint, `k == 0`, invalid configuration,
    /// malformed graph file content.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Node id outside `[0, len)`.
    #[error("node {id} out of range for graph with {len} nodes")]
    OutOfRange { id: usize, len: usize },

    /// Graph file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The worker pool for parallel runs could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ColoringError {
    /// Creates an [`ColoringError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        ColoringError::InvalidArgument(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ColoringError>;
