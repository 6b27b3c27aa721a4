//! Batch entry point shared by all notification handlers.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use leavesync_domain::{AlertResponse, NotificationBatch};
use tracing::{error, info};

use super::response;
use crate::errors::SyncError;

/// Something that reacts to a batch of notifications.
#[async_trait]
pub trait NotificationHandler: Send + Sync {
    fn name(&self) -> &str;

    /// Handle the batch, returning zero or more responses.
    ///
    /// An `Err` means the handler failed as a whole; per-event failures are
    /// expected to be reported as error responses instead.
    async fn handle(
        &self,
        batch: &NotificationBatch,
        request_id: &str,
    ) -> Result<Vec<AlertResponse>, SyncError>;
}

/// Logs incoming batches and contributes no responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotificationHandler;

#[async_trait]
impl NotificationHandler for LoggingNotificationHandler {
    fn name(&self) -> &str {
        "logging"
    }

    async fn handle(
        &self,
        batch: &NotificationBatch,
        request_id: &str,
    ) -> Result<Vec<AlertResponse>, SyncError> {
        for event in &batch.events {
            let keys: Vec<String> = event
                .entity_keys
                .iter()
                .map(|key| format!("{}={}", key.name, key.value.as_deref().unwrap_or_default()))
                .collect();
            info!(request_id, keys = %keys.join(","), "notification received");
        }
        Ok(Vec::new())
    }
}

/// Runs every registered handler for a batch and folds their responses.
pub struct NotificationEndpoint {
    handlers: Vec<Arc<dyn NotificationHandler>>,
}

impl NotificationEndpoint {
    pub fn new(handlers: Vec<Arc<dyn NotificationHandler>>) -> Self {
        Self { handlers }
    }

    /// Aggregated response for `batch`.
    ///
    /// Responses are reduced in handler registration order, then event
    /// order. A handler that fails as a whole contributes a `500` response.
    pub async fn process(&self, batch: &NotificationBatch, request_id: &str) -> AlertResponse {
        let runs = self.handlers.iter().map(|handler| async move {
            match handler.handle(batch, request_id).await {
                Ok(responses) => responses,
                Err(err) => {
                    error!(handler = handler.name(), request_id, error = %err, "notification handler failed");
                    vec![response::handler_failure(request_id, &err)]
                }
            }
        });

        AlertResponse::aggregate(join_all(runs).await.into_iter().flatten())
    }
}
