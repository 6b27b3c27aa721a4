//! Access tokens for outbound provider calls.

use async_trait::async_trait;
use leavesync_domain::{LeaveSyncError, Result};

/// Provides OAuth access tokens for provider APIs.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Retrieve a bearer token to authorize API calls.
    async fn access_token(&self) -> Result<String>;
}

/// Pre-issued token taken from configuration.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        if self.token.trim().is_empty() {
            return Err(LeaveSyncError::Auth("No access token configured".into()));
        }
        Ok(self.token.clone())
    }
}
