//! Error codes and error bodies for the file API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable error code returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The path escapes the configured root. Never retried.
    InvalidPath,
    /// The target or a required parent does not exist.
    NotFound,
    /// The operating system refused access.
    PermissionDenied,
    /// A conflicting entry already exists.
    AlreadyExists,
    /// Any other filesystem or internal failure.
    Internal,
}

/// Error body serialized in failed responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code:?}: {message}")]
pub struct ErrorBody {
    /// Machine-readable code.
    pub code: ErrorCode,
    /// Human-readable detail.
    pub message: String,
}

impl ErrorBody {
    /// Build an error body from a code and any displayable detail.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
