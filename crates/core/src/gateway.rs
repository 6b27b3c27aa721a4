//! Fan-out over the registered calendar providers.

use std::sync::Arc;

use futures::future::join_all;
use leavesync_domain::{Action, CalendarEvent, LeaveRecord};
use tracing::{debug, warn};

use crate::calendar_ports::CalendarProvider;
use crate::errors::{ProviderError, SyncError};

/// Result of one provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOutcome {
    pub provider: String,
    pub result: Result<(), ProviderError>,
}

/// Outcomes of a fan-out, in provider registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutReport {
    pub outcomes: Vec<ProviderOutcome>,
}

impl FanOutReport {
    /// True when every provider succeeded (vacuously true with no providers).
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProviderError> {
        self.outcomes.iter().filter_map(|outcome| outcome.result.as_ref().err())
    }
}

/// Dispatches leave records to every provider concurrently.
///
/// Holds no provider state; a failing provider never prevents the others
/// from being called.
#[derive(Clone, Default)]
pub struct CalendarProviderGateway {
    providers: Vec<Arc<dyn CalendarProvider>>,
}

impl CalendarProviderGateway {
    pub fn new(providers: Vec<Arc<dyn CalendarProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub async fn create(&self, record: &LeaveRecord) -> FanOutReport {
        self.fan_out(record, Action::Create).await
    }

    pub async fn update(&self, record: &LeaveRecord) -> FanOutReport {
        self.fan_out(record, Action::Update).await
    }

    pub async fn cancel(&self, record: &LeaveRecord) -> FanOutReport {
        self.fan_out(record, Action::Cancel).await
    }

    /// Route `record` by its action.
    pub async fn dispatch(&self, record: &LeaveRecord) -> Result<FanOutReport, SyncError> {
        let action = record.action.ok_or(SyncError::InvalidAction)?;
        Ok(self.fan_out(record, action).await)
    }

    /// Conflicting events from all providers, concatenated in registration
    /// order. The first failing provider fails the whole call.
    pub async fn get_conflicting(
        &self,
        windows: &[LeaveRecord],
    ) -> Result<Vec<CalendarEvent>, ProviderError> {
        let calls = self.providers.iter().map(|provider| async move {
            provider
                .get_conflicting(windows)
                .await
                .map_err(|err| ProviderError::new(provider.name(), &err))
        });

        let mut events = Vec::new();
        for result in join_all(calls).await {
            events.extend(result?);
        }
        Ok(events)
    }

    async fn fan_out(&self, record: &LeaveRecord, action: Action) -> FanOutReport {
        debug!(
            external_code = %record.external_code,
            %action,
            providers = self.providers.len(),
            "dispatching leave record to providers"
        );

        let calls = self.providers.iter().map(|provider| async move {
            let result = match action {
                Action::Create => provider.create(record).await,
                Action::Update => provider.update(record).await,
                Action::Cancel => provider.cancel(record).await,
            };
            let result = result.map_err(|err| {
                let err = ProviderError::new(provider.name(), &err);
                warn!(provider = %err.provider, status = ?err.status, error = %err.message, %action, "provider call failed");
                err
            });
            ProviderOutcome { provider: provider.name().to_string(), result }
        });

        FanOutReport { outcomes: join_all(calls).await }
    }
}
