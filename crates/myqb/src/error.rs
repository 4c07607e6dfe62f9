//! Error types for myqb

use thiserror::Error;

/// Result type alias for builder operations
pub type QbResult<T> = Result<T, QbError>;

/// Error types for query construction and rendering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QbError {
    /// Operator outside the comparison allow-list
    #[error("invalid operator: {0}")]
    InvalidOperator(String),

    /// Render requested before a table was set
    #[error("no table set: call table() or from() before rendering")]
    MissingTable,
}
