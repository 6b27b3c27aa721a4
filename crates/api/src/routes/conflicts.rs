//! Calendar conflicts with upcoming leave

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use leavesync_core::SyncError;
use leavesync_domain::CalendarEvent;
use serde_json::json;
use tracing::error;

use crate::context::AppContext;

/// `GET /api/v1/conflicting/{user_id}`
pub async fn conflicting_events(
    State(ctx): State<Arc<AppContext>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<CalendarEvent>>, ConflictsError> {
    let events = ctx.conflicts.get_conflicts(&user_id).await.map_err(ConflictsError)?;
    Ok(Json(events))
}

/// Lookup failure rendered as `{"error": ...}`.
#[derive(Debug)]
pub struct ConflictsError(pub SyncError);

impl IntoResponse for ConflictsError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SyncError::ConflictLookup { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!(error = %self.0, %status, "conflict lookup failed");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
