//! Error types for the geometry database.

use thiserror::Error;

/// Errors raised by database loading and geometry queries.
#[derive(Error, Debug)]
pub enum DbError {
    /// An I/O error occurred while reading a database file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The database file is not valid JSON or has the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A name did not resolve to any object.
    #[error("object not found: {0}")]
    NotFound(String),

    /// Two objects were declared with the same name.
    #[error("duplicate object name: {0}")]
    DuplicateObject(String),

    /// Combination members reference each other in a cycle.
    #[error("reference cycle through {0}")]
    Cycle(String),

    /// The object resolved but contains no geometry to bound.
    #[error("object {0} has no geometry")]
    EmptyBounds(String),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DbError>;
