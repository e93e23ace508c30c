//! Failure taxonomy for page and config operations.
//!
//! Every failure carries enough detail for the caller to tell the kinds
//! apart (see [`ErrorKind`]).  Nothing is retried automatically.

use std::path::PathBuf;

use rotation_core::{CodecError, NameError};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the page directory, the config store and the
/// lifecycle coordinator.
#[derive(Debug, Error)]
pub enum PageError {
    /// The requested page file does not exist.
    #[error("page not found: {0}")]
    NotFound(String),

    /// The filename breaks the `.html` suffix or path separator rule.
    #[error("invalid page filename: {0}")]
    InvalidInput(#[source] NameError),

    /// The operation targets the reserved rotation output page.
    #[error("forbidden: {0}")]
    Forbidden(#[source] NameError),

    /// A read, write, rename or directory creation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sidecar exists but is not a valid page config.
    #[error("failed to decode page config at {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    /// The config could not be serialized for saving.
    #[error("failed to encode page config: {0}")]
    Encode(#[source] CodecError),
}

/// Coarse classification of a [`PageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Forbidden,
    IoFailure,
    DecodeFailure,
}

impl PageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PageError::NotFound(_) => ErrorKind::NotFound,
            PageError::InvalidInput(_) => ErrorKind::InvalidInput,
            PageError::Forbidden(_) => ErrorKind::Forbidden,
            PageError::Io { .. } | PageError::Encode(_) => ErrorKind::IoFailure,
            PageError::Decode { .. } => ErrorKind::DecodeFailure,
        }
    }

    /// Wraps an I/O error, keeping the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PageError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<NameError> for PageError {
    fn from(err: NameError) -> Self {
        if err.is_reserved() {
            PageError::Forbidden(err)
        } else {
            PageError::InvalidInput(err)
        }
    }
}
