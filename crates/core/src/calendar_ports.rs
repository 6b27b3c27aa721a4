//! Calendar provider port interfaces

use async_trait::async_trait;
use leavesync_domain::{CalendarEvent, LeaveRecord, Result};

/// A calendar backend that mirrors leave records.
///
/// Implementations are stateless from the gateway's point of view and must
/// tolerate being called concurrently for different records.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Stable name used in logs and error messages
    fn name(&self) -> &str;

    /// Block the leave window in the user's calendar
    async fn create(&self, record: &LeaveRecord) -> Result<()>;

    /// Bring an existing out-of-office entry in line with `record`
    async fn update(&self, record: &LeaveRecord) -> Result<()>;

    /// Remove the out-of-office entry for `record`
    async fn cancel(&self, record: &LeaveRecord) -> Result<()>;

    /// Events overlapping any of `windows`
    async fn get_conflicting(&self, windows: &[LeaveRecord]) -> Result<Vec<CalendarEvent>>;
}
