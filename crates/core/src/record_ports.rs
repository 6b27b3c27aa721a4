//! Port for the authoritative leave record service

use async_trait::async_trait;
use leavesync_domain::{LeaveRecord, LeaveWindowList, Result};

/// Source of truth for leave records.
#[async_trait]
pub trait LeaveRecordService: Send + Sync {
    /// Fetch one record by external code.
    ///
    /// A record that does not exist is reported as
    /// [`LeaveSyncError::NotFound`](leavesync_domain::LeaveSyncError::NotFound).
    async fn get_by_id(&self, external_code: &str) -> Result<LeaveRecord>;

    /// Currently relevant leave windows of a user, `None` when there are none.
    async fn get_latest_for_user(&self, user_id: &str) -> Result<Option<LeaveWindowList>>;
}
