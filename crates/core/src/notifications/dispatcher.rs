//! Reconciliation of leave notifications with calendar providers.
//!
//! Each event goes through the same stages:
//!
//! 1. extract the `externalCode` key
//! 2. fetch the authoritative record
//! 3. accept only approved or cancelled records
//! 4. classify into create / update / cancel
//! 5. update the leave window cache
//! 6. dispatch to every calendar provider
//!
//! A failure in stages 1-5 ends that event with a pipeline error response;
//! provider failures become the event's error response. Nothing escapes to
//! the caller and the other events of the batch are unaffected.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use leavesync_domain::constants::EXTERNAL_CODE_KEY;
use leavesync_domain::{
    AlertResponse, ApprovalStatus, LeaveRecord, LeaveSyncError, NotificationBatch,
    NotificationEvent,
};
use tracing::{debug, error, info, instrument, warn};

use super::endpoint::NotificationHandler;
use super::response;
use crate::action;
use crate::cache::LeaveWindowCache;
use crate::errors::{ProviderError, Severity, SyncError};
use crate::gateway::CalendarProviderGateway;
use crate::record_ports::LeaveRecordService;

/// Drives notification events through the reconciliation stages.
pub struct NotificationDispatcher {
    records: Arc<dyn LeaveRecordService>,
    cache: Arc<LeaveWindowCache>,
    gateway: Arc<CalendarProviderGateway>,
}

impl NotificationDispatcher {
    pub fn new(
        records: Arc<dyn LeaveRecordService>,
        cache: Arc<LeaveWindowCache>,
        gateway: Arc<CalendarProviderGateway>,
    ) -> Self {
        Self { records, cache, gateway }
    }

    /// Process every event of `batch` concurrently; one response per event,
    /// in input order.
    pub async fn handle_batch(
        &self,
        batch: &NotificationBatch,
        request_id: &str,
    ) -> Vec<AlertResponse> {
        join_all(batch.events.iter().map(|event| self.handle_event(event, request_id))).await
    }

    #[instrument(skip_all, fields(request_id = %request_id, external_code = tracing::field::Empty))]
    pub async fn handle_event(&self, event: &NotificationEvent, request_id: &str) -> AlertResponse {
        let external_code = match extract_key(event) {
            Ok(code) => code,
            Err(err) => return failure(request_id, None, &err),
        };
        tracing::Span::current().record("external_code", external_code);

        let record = match self.prepare(external_code).await {
            Ok(record) => record,
            Err(err) => return failure(request_id, Some(external_code), &err),
        };

        self.dispatch(&record, request_id).await
    }

    /// Stages 2-5.
    async fn prepare(&self, external_code: &str) -> Result<LeaveRecord, SyncError> {
        let record = self.fetch_record(external_code).await?;
        accept(&record)?;

        let record = action::classify(record);
        debug!(action = ?record.action, user_id = %record.user_id, "classified leave record");

        self.cache.update(&record)?;
        Ok(record)
    }

    async fn fetch_record(&self, external_code: &str) -> Result<LeaveRecord, SyncError> {
        self.records.get_by_id(external_code).await.map_err(|err| match err {
            LeaveSyncError::NotFound(_) => SyncError::RecordNotFound { id: external_code.to_string() },
            source => SyncError::RecordFetch { id: external_code.to_string(), source },
        })
    }

    async fn dispatch(&self, record: &LeaveRecord, request_id: &str) -> AlertResponse {
        let report = match self.gateway.dispatch(record).await {
            Ok(report) => report,
            Err(err) => return failure(request_id, Some(&record.external_code), &err),
        };
        let Some(action) = record.action else {
            return failure(request_id, Some(&record.external_code), &SyncError::InvalidAction);
        };

        let failures: Vec<&ProviderError> = report.failures().collect();
        if failures.is_empty() {
            info!(%action, providers = report.outcomes.len(), "leave record synchronised");
            return response::success(request_id, action, &record.external_code);
        }

        error!(%action, failed = failures.len(), providers = report.outcomes.len(), "provider dispatch failed");
        response::provider_failure(request_id, action, &record.external_code, &failures)
    }
}

#[async_trait]
impl NotificationHandler for NotificationDispatcher {
    fn name(&self) -> &str {
        "leave-record-dispatcher"
    }

    async fn handle(
        &self,
        batch: &NotificationBatch,
        request_id: &str,
    ) -> Result<Vec<AlertResponse>, SyncError> {
        Ok(self.handle_batch(batch, request_id).await)
    }
}

fn extract_key(event: &NotificationEvent) -> Result<&str, SyncError> {
    event.key(EXTERNAL_CODE_KEY).ok_or(SyncError::MissingKey)
}

fn accept(record: &LeaveRecord) -> Result<(), SyncError> {
    match record.approval_status {
        ApprovalStatus::Approved | ApprovalStatus::Cancelled => Ok(()),
        status => Err(SyncError::UnsupportedStatus { status }),
    }
}

fn failure(request_id: &str, external_code: Option<&str>, err: &SyncError) -> AlertResponse {
    match err.severity() {
        Severity::Warning => warn!(error = %err, "notification rejected"),
        Severity::Error | Severity::Critical => error!(error = %err, "notification processing failed"),
    }
    response::pipeline_failure(request_id, external_code, err)
}
