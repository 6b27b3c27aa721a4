use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use leavesync_core::LeaveRecordService;
use leavesync_domain::{LeaveRecord, LeaveSyncError, LeaveWindowList, Result as DomainResult};

/// In-memory mock for `LeaveRecordService`.
///
/// Unknown ids answer `NotFound`; an injected failure is returned by every
/// call until cleared.
#[derive(Default, Clone)]
pub struct MockLeaveRecordService {
    records: Arc<Mutex<HashMap<String, LeaveRecord>>>,
    latest: Arc<Mutex<HashMap<String, LeaveWindowList>>>,
    failure: Arc<Mutex<Option<LeaveSyncError>>>,
    lookups: Arc<AtomicUsize>,
}

impl MockLeaveRecordService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, record: LeaveRecord) -> Self {
        self.insert(record);
        self
    }

    /// Add or replace a record; visible to every clone of this mock.
    pub fn insert(&self, record: LeaveRecord) {
        self.records.lock().unwrap().insert(record.external_code.clone(), record);
    }

    pub fn with_latest(self, user_id: &str, windows: LeaveWindowList) -> Self {
        self.latest.lock().unwrap().insert(user_id.to_string(), windows);
        self
    }

    pub fn failing_with(self, err: LeaveSyncError) -> Self {
        *self.failure.lock().unwrap() = Some(err);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn injected_failure(&self) -> Option<LeaveSyncError> {
        self.failure.lock().unwrap().clone()
    }
}

#[async_trait]
impl LeaveRecordService for MockLeaveRecordService {
    async fn get_by_id(&self, external_code: &str) -> DomainResult<LeaveRecord> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.injected_failure() {
            return Err(err);
        }
        self.records
            .lock()
            .unwrap()
            .get(external_code)
            .cloned()
            .ok_or_else(|| LeaveSyncError::NotFound(format!("EmployeeTime('{external_code}')")))
    }

    async fn get_latest_for_user(&self, user_id: &str) -> DomainResult<Option<LeaveWindowList>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.injected_failure() {
            return Err(err);
        }
        Ok(self.latest.lock().unwrap().get(user_id).cloned())
    }
}
