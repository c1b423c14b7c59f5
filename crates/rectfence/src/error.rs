//! Error types for the rectfence library.

use thiserror::Error;

/// Errors surfaced by parsing and solving.
#[derive(Debug, Error)]
pub enum Error {
    /// The input text does not match the `N K` / `x y w` format.
    #[error("invalid input at line {line}: {reason}")]
    InvalidInput { line: usize, reason: String },

    /// The instance contains no points.
    #[error("instance has no points")]
    EmptyInstance,

    /// The coverage target exceeds the number of points.
    #[error("coverage target {required} exceeds available point count {available}")]
    InfeasibleCoverage { required: usize, available: usize },

    /// No grid trial produced a region meeting the coverage target.
    #[error("no grid trial produced a region covering {required} points")]
    NoFeasibleRegion { required: usize },

    /// Underlying I/O failure while reading input or writing output.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
