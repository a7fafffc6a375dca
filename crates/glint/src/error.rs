//! Error types for scene assembly.

use thiserror::Error;

/// Errors raised while assembling a render project.
#[derive(Error, Debug)]
pub enum RenderError {
    /// No top-level objects were requested.
    #[error("no objects specified")]
    NoObjects,

    /// The requested objects reach no solid primitives.
    #[error("no primitives active")]
    NoSolids,

    /// The requested objects reach no regions.
    #[error("no regions active")]
    NoRegions,

    /// The model-to-view matrix could not be inverted.
    #[error("singular view transform")]
    SingularView,

    /// The per-thread resource pool has no slots.
    #[error("resource pool is empty")]
    EmptyResourcePool,

    /// Render settings failed validation.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A geometry database operation failed.
    #[error("database error: {0}")]
    Db(#[from] glint_db::DbError),

    /// A scene construction step failed.
    #[error("scene error: {0}")]
    Scene(#[from] glint_scene::SceneError),

    /// A settings file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for assembly operations.
pub type Result<T> = std::result::Result<T, RenderError>;
