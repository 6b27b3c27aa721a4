//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for LeaveSync
///
/// Collaborators (record service, calendar providers, configuration) report
/// failures with this type. Pipeline-level classification lives in
/// `leavesync-core`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum LeaveSyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote system answered with a non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LeaveSyncError {
    /// HTTP status reported by the remote system, when there is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure is transient (network trouble or a 5xx/429 answer).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for LeaveSync operations
pub type Result<T> = std::result::Result<T, LeaveSyncError>;
