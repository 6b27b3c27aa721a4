//! Per-user leave window cache backed by moka
//!
//! Holds the leave windows currently relevant for each user. Entries expire
//! after a TTL and the number of users is bounded; an expired or evicted
//! entry behaves as absent. The cache is best-effort and can always be
//! rebuilt from the record service.
//!
//! # Concurrency
//!
//! Read-modify-write cycles on one user go through moka's per-key compute,
//! so two concurrent updates for the same user never lose a write. Updates
//! for different users do not block each other.

use std::time::Duration;

use leavesync_domain::{Action, CacheConfig, LeaveRecord, LeaveWindowList};
use moka::ops::compute::{CompResult, Op};
use moka::sync::Cache;
use tracing::debug;

use crate::errors::SyncError;

/// Leave window cache settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveWindowCacheConfig {
    /// Time-to-live of a user entry, measured from its last write
    pub ttl: Duration,

    /// Maximum number of user entries
    pub max_capacity: u64,
}

impl Default for LeaveWindowCacheConfig {
    fn default() -> Self {
        CacheConfig::default().into()
    }
}

impl From<CacheConfig> for LeaveWindowCacheConfig {
    fn from(config: CacheConfig) -> Self {
        Self { ttl: Duration::from_secs(config.ttl_seconds), max_capacity: config.max_capacity }
    }
}

impl LeaveWindowCacheConfig {
    /// Log configuration at startup
    pub fn log_config(&self) {
        tracing::info!(
            ttl_seconds = self.ttl.as_secs(),
            max_capacity = self.max_capacity,
            "leave window cache configuration loaded"
        );
    }
}

/// Bounded, expiring map from user id to that user's leave windows.
pub struct LeaveWindowCache {
    inner: Cache<String, LeaveWindowList>,
}

impl LeaveWindowCache {
    pub fn new(config: LeaveWindowCacheConfig) -> Self {
        config.log_config();
        let inner = Cache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        Self { inner }
    }

    pub fn get(&self, user_id: &str) -> Option<LeaveWindowList> {
        self.inner.get(user_id)
    }

    pub fn put(&self, user_id: &str, windows: LeaveWindowList) {
        self.inner.insert(user_id.to_string(), windows);
    }

    /// Overwrite the entry for `user_id` only if one exists.
    ///
    /// Returns whether a write happened.
    pub fn replace(&self, user_id: &str, windows: LeaveWindowList) -> bool {
        let result = self.inner.entry_by_ref(user_id).and_compute_with(|current| match current {
            Some(_) => Op::Put(windows),
            None => Op::Nop,
        });
        matches!(result, CompResult::ReplacedWith(_))
    }

    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Number of user entries, after applying pending evictions.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    /// Apply a classified record to its user's entry.
    ///
    /// Create and update append the record, creating the entry if needed.
    /// Cancel removes every window with the record's external code and never
    /// creates an entry. A record without an action leaves the cache untouched.
    pub fn update(&self, record: &LeaveRecord) -> Result<(), SyncError> {
        let action = record.action.ok_or(SyncError::InvalidAction)?;
        let user_id = record.user_id.as_str();

        match action {
            Action::Create | Action::Update => {
                self.inner.entry_by_ref(user_id).and_compute_with(|current| {
                    let mut windows = current.map(|entry| entry.into_value()).unwrap_or_default();
                    windows.push(record.clone());
                    Op::Put(windows)
                });
            }
            Action::Cancel => {
                self.inner.entry_by_ref(user_id).and_compute_with(|current| match current {
                    Some(entry) => {
                        let mut windows = entry.into_value();
                        windows.retain(|window| window.external_code != record.external_code);
                        Op::Put(windows)
                    }
                    None => Op::Nop,
                });
            }
        }

        debug!(user_id, external_code = %record.external_code, %action, "leave window cache updated");
        Ok(())
    }
}
