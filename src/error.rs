//! Error types for skylio.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SkylioError>;

/// Errors surfaced by index construction and querying.
///
/// Contradictory domination states encountered during a query are not
/// errors; they are defined zero-probability results. Everything here is
/// a caller-visible contract violation, raised eagerly so a partially
/// built index is never observable.
#[derive(Debug, Error)]
pub enum SkylioError {
    /// Malformed plane or parameter values.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A space, plane, or query region disagrees with the configured
    /// dimensionality.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The index space has zero or negative extent on some axis.
    #[error("Empty space: {0}")]
    EmptySpace(String),

    /// Configuration failed to parse or validate.
    #[error("Configuration error: {0}")]
    Config(String),
}
