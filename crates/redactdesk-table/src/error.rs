//! Error types for the collection engine.

use thiserror::Error;

/// Errors raised when list state would break one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two column descriptors share an id.
    #[error("Duplicate column id: {0}")]
    DuplicateColumn(String),

    /// A filter token references a property no column declares.
    #[error("Unknown filter property: {0}")]
    UnknownProperty(String),

    /// A filter token uses an operator its column does not allow.
    #[error("Operator '{operator}' is not allowed on property '{property}'")]
    UnsupportedOperator {
        /// Property key of the offending token.
        property: String,
        /// Operator symbol of the offending token.
        operator: String,
    },

    /// Page size of zero.
    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    /// Page indices start at 1.
    #[error("Page index must be at least 1, got {0}")]
    InvalidPageIndex(usize),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
