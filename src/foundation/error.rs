use std::path::PathBuf;

/// Convenience result type used across Montage.
pub type MontageResult<T> = Result<T, MontageError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MontageError {
    /// Invalid caller-provided data (configuration, manifests, empty inputs).
    #[error("validation error: {0}")]
    Validation(String),

    /// The entity or image kind is not handled by the engine that was asked.
    #[error("unsupported request: {0}")]
    Unsupported(String),

    /// A source image could not be opened, read, or decoded.
    #[error("source image '{path}': {reason}")]
    Source {
        /// Path of the offending source file.
        path: PathBuf,
        /// Lower-level failure description.
        reason: String,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MontageError {
    /// Build a [`MontageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MontageError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`MontageError::Source`] value.
    pub fn source(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::Source {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`MontageError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
