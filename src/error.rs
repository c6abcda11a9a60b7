//! Error types for folder art generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for folder art operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a folder art set.
///
/// Every variant is terminal for the request that raised it. Nothing in the
/// pipeline catches or retries, except [`Error::IdCollision`] during output
/// directory allocation.
#[derive(Debug, Error)]
pub enum Error {
    /// The submitted form has no usable `file` field.
    #[error("Couldn't get file")]
    MissingFile,

    /// Image bytes could not be decoded.
    #[error("failed to decode image `{name}`: {reason}")]
    Decode { name: String, reason: String },

    /// A built-in icon identifier has no matching asset.
    #[error("no built-in icon named `{0}`")]
    NotFound(String),

    /// A filesystem operation failed.
    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    /// Canvas allocation, drawing or encoding failed.
    #[error("rendering failed: {0}")]
    Render(String),

    /// The generated output directory already exists.
    #[error("output directory `{0}` already exists")]
    IdCollision(PathBuf),

    /// A configuration document could not be parsed.
    #[error("invalid configuration")]
    Config(#[from] serde_json::Error),

    /// A configuration value is outside its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io(path.into(), source)
    }

    pub(crate) fn decode(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if retrying the operation with fresh inputs may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::IdCollision(_))
    }
}
