//! Error types shared by every fallible operation in the crate.
//!
//! Math and data-model operations never fail. Only setup-dependent calls and the
//! integration boundaries (tensor arrays, files, renderers) return [`Result`].

use std::path::PathBuf;

/// Errors produced by buildify.
#[derive(Debug, thiserror::Error)]
pub enum BuildifyError {
    /// An operation ran before the setup step it depends on.
    #[error("{0} is not initialized")]
    NotInitialized(&'static str),

    /// A referenced entity is not part of the scene.
    #[error("Entity not found in scene: {0}")]
    NotFound(String),

    /// The entity exists but does not carry camera parameters.
    #[error("Entity '{0}' is not a camera")]
    NotACamera(String),

    /// Parallel attribute arrays disagree on the gaussian count or row width.
    #[error("Shape mismatch for {attribute}: expected {expected} values, got {actual}")]
    ShapeMismatch {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The operation is an extension point with no implementation yet.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),

    /// Reading or writing a file failed.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A scene document could not be encoded or decoded.
    #[error("Scene document error: {0}")]
    Json(#[from] serde_json::Error),

    /// An engine configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl BuildifyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildifyError>;
