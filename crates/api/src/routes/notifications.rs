//! Inbound change notifications

use std::sync::Arc;

use axum::extract::State;
use axum::{Extension, Json};
use leavesync_domain::{AlertResponse, NotificationBatch};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::AppContext;
use crate::utils::RequestId;

/// Envelope expected by the notification sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReply {
    pub response_payload: AlertResponse,
}

/// `POST /notifications`
///
/// Always answers 200; the outcome of every event is carried in the payload.
pub async fn receive_notifications(
    State(ctx): State<Arc<AppContext>>,
    Extension(request_id): Extension<RequestId>,
    Json(batch): Json<NotificationBatch>,
) -> Json<NotificationReply> {
    info!(events = batch.events.len(), "notification batch received");
    let response_payload = ctx.endpoint.process(&batch, request_id.as_str()).await;
    Json(NotificationReply { response_payload })
}
