//! Error types for scene construction and project output.

use thiserror::Error;

/// Errors raised while building or writing a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    /// An entity was inserted under a name the container already holds.
    #[error("duplicate {kind} name: {name}")]
    DuplicateName {
        /// Entity kind, for example "assembly" or "material".
        kind: &'static str,
        /// The colliding name.
        name: String,
    },

    /// An I/O error occurred while writing the project document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The project document could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
