//! Error types shared across the crate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DataAccessError>;

/// Which backend operation a reported error belongs to.
///
/// Used only for error messages ("Insert error: ...", "Select error: ...").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOp {
    Insert,
    Delete,
    Update,
    Select,
}

impl std::fmt::Display for BackendOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BackendOp::Insert => "Insert",
            BackendOp::Delete => "Delete",
            BackendOp::Update => "Update",
            BackendOp::Select => "Select",
        };
        f.write_str(name)
    }
}

/// Errors raised by the data access layer.
///
/// Precondition and condition-translation errors are raised before any
/// network call. Backend-reported errors are additionally wrapped in
/// [`DataAccessError::Operation`] so every execution failure carries an
/// operation-scoped message chain.
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("A table is required to perform the query.")]
    MissingTable,

    #[error("Columns and values must be arrays of the same length.")]
    ColumnValueMismatch,

    #[error("Condition type not supported: {0}")]
    UnsupportedCondition(String),

    #[error("The value of the 'range' condition must be an array with two elements.")]
    InvalidRange,

    #[error("The value of the 'or' condition must be an array of {{field, operator, value}} objects.")]
    InvalidOr,

    /// The backend resolved the call but reported an error in its envelope.
    #[error("{op} error: {message}")]
    Backend { op: BackendOp, message: String },

    /// Outer per-operation wrap around any execution failure.
    #[error("{context}: {source}")]
    Operation {
        context: String,
        #[source]
        source: Box<DataAccessError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never resolved to a backend envelope (network, timeout,
    /// unreadable body).
    #[error("Transport error: {0}")]
    Transport(String),
}
