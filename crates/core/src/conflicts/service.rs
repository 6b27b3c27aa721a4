use std::sync::Arc;

use leavesync_domain::{CalendarEvent, EventStatus};
use tracing::{debug, error, instrument};

use crate::cache::LeaveWindowCache;
use crate::errors::{LookupFailure, SyncError};
use crate::gateway::CalendarProviderGateway;
use crate::record_ports::LeaveRecordService;

/// Finds calendar events that clash with a user's upcoming leave.
pub struct ConflictDetectionService {
    records: Arc<dyn LeaveRecordService>,
    cache: Arc<LeaveWindowCache>,
    gateway: Arc<CalendarProviderGateway>,
}

impl ConflictDetectionService {
    pub fn new(
        records: Arc<dyn LeaveRecordService>,
        cache: Arc<LeaveWindowCache>,
        gateway: Arc<CalendarProviderGateway>,
    ) -> Self {
        Self { records, cache, gateway }
    }

    /// Events overlapping the user's latest leave windows, excluding
    /// out-of-office entries.
    ///
    /// Leave windows always come from the record service, never from the
    /// cache; the fetched list is written to the cache before providers are
    /// queried and the write is kept even if the query fails.
    #[instrument(skip(self))]
    pub async fn get_conflicts(&self, user_id: &str) -> Result<Vec<CalendarEvent>, SyncError> {
        let latest = self.records.get_latest_for_user(user_id).await.map_err(|err| {
            lookup_error(user_id, LookupFailure::Record(err))
        })?;

        let Some(windows) = latest.filter(|windows| !windows.is_empty()) else {
            debug!("no upcoming leave windows");
            return Ok(Vec::new());
        };

        self.cache.put(user_id, windows.clone());

        let events = self
            .gateway
            .get_conflicting(&windows)
            .await
            .map_err(|err| lookup_error(user_id, LookupFailure::Provider(err)))?;

        let conflicts: Vec<_> =
            events.into_iter().filter(|event| event.status != EventStatus::Oof).collect();
        debug!(windows = windows.len(), conflicts = conflicts.len(), "conflict lookup finished");
        Ok(conflicts)
    }
}

fn lookup_error(user_id: &str, source: LookupFailure) -> SyncError {
    let err = SyncError::ConflictLookup { user_id: user_id.to_string(), source };
    error!(error = %err, "conflict lookup failed");
    err
}
