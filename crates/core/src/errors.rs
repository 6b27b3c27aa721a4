//! Pipeline error taxonomy.
//!
//! Every failure the notification and conflict pipelines can produce is a
//! [`SyncError`]. Event-local failures are turned into that event's response
//! by the dispatcher; conflict lookups surface them to the caller.

use leavesync_domain::{ApprovalStatus, LeaveSyncError};
use thiserror::Error;

/// How loudly a failure should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Caller sent something we cannot act on.
    Warning,
    /// A collaborator failed.
    Error,
    /// Programming error; should never happen in a correct deployment.
    Critical,
}

/// Failure reported by one calendar provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{provider}: {message}")]
pub struct ProviderError {
    pub provider: String,
    /// HTTP status returned by the provider's backend, when known.
    pub status: Option<u16>,
    pub message: String,
}

impl ProviderError {
    pub fn new(provider: impl Into<String>, err: &LeaveSyncError) -> Self {
        let message = match err {
            LeaveSyncError::Upstream { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self { provider: provider.into(), status: err.status_code(), message }
    }

    pub fn is_retryable(&self) -> bool {
        self.status.map_or(true, |status| status == 429 || status >= 500)
    }
}

/// Why a conflict lookup failed.
#[derive(Debug, Error)]
pub enum LookupFailure {
    #[error(transparent)]
    Record(LeaveSyncError),
    #[error(transparent)]
    Provider(ProviderError),
}

/// Errors raised while reconciling notifications or looking up conflicts.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("The externalCode property is missing from the event request payload")]
    MissingKey,

    #[error("EmployeeTime entity with id {id} is not found")]
    RecordNotFound { id: String },

    #[error("Failed to fetch EmployeeTime entity with id {id}: {source}")]
    RecordFetch {
        id: String,
        #[source]
        source: LeaveSyncError,
    },

    #[error("Unsupported EmployeeTime approval status. Supported statuses - APPROVED, CANCELLED")]
    UnsupportedStatus { status: ApprovalStatus },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Failed to look up conflicting events for user {user_id}: {source}")]
    ConflictLookup {
        user_id: String,
        #[source]
        source: LookupFailure,
    },

    #[error("Action cannot be null")]
    InvalidAction,
}

impl SyncError {
    /// Whether repeating the same call later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RecordFetch { source, .. } => source.is_transient(),
            Self::Provider(err) => err.is_retryable(),
            Self::ConflictLookup { source: LookupFailure::Record(err), .. } => err.is_transient(),
            Self::ConflictLookup { source: LookupFailure::Provider(err), .. } => err.is_retryable(),
            Self::MissingKey
            | Self::RecordNotFound { .. }
            | Self::UnsupportedStatus { .. }
            | Self::InvalidAction => false,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingKey | Self::RecordNotFound { .. } | Self::UnsupportedStatus { .. } => {
                Severity::Warning
            }
            Self::RecordFetch { .. } | Self::Provider(_) | Self::ConflictLookup { .. } => {
                Severity::Error
            }
            Self::InvalidAction => Severity::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_keeps_upstream_status() {
        let err = ProviderError::new(
            "google",
            &LeaveSyncError::Upstream { status: 409, message: "already exists".into() },
        );
        assert_eq!(err.status, Some(409));
        assert_eq!(err.to_string(), "google: already exists");
        assert!(!err.is_retryable());
    }

    #[test]
    fn provider_error_without_status_is_retryable() {
        let err = ProviderError::new("google", &LeaveSyncError::Network("timed out".into()));
        assert_eq!(err.status, None);
        assert!(err.is_retryable());
    }

    #[test]
    fn messages_match_operator_facing_wording() {
        assert_eq!(
            SyncError::RecordNotFound { id: "42".into() }.to_string(),
            "EmployeeTime entity with id 42 is not found"
        );
        assert_eq!(SyncError::InvalidAction.to_string(), "Action cannot be null");
    }

    #[test]
    fn severity_and_retryability() {
        assert_eq!(SyncError::InvalidAction.severity(), Severity::Critical);
        assert_eq!(SyncError::MissingKey.severity(), Severity::Warning);

        let fetch = SyncError::RecordFetch {
            id: "1".into(),
            source: LeaveSyncError::Network("reset".into()),
        };
        assert!(fetch.is_retryable());
        assert_eq!(fetch.severity(), Severity::Error);
        assert!(!SyncError::UnsupportedStatus { status: ApprovalStatus::Pending }.is_retryable());
    }
}
