//! Per-event response construction.

use chrono::Utc;
use leavesync_domain::{Action, AlertResponse};

use crate::errors::{ProviderError, SyncError};

/// Prefix `message` with the request correlation id.
pub fn with_request_id(request_id: &str, message: &str) -> String {
    format!("[{request_id}] {message}")
}

/// Status code reported for a successful action.
pub const fn success_status(action: Action) -> u16 {
    match action {
        Action::Create => 201,
        Action::Update => 200,
        Action::Cancel => 204,
    }
}

const fn past_tense(action: Action) -> &'static str {
    match action {
        Action::Create => "created",
        Action::Update => "updated",
        Action::Cancel => "deleted",
    }
}

const fn gerund(action: Action) -> &'static str {
    match action {
        Action::Create => "creating",
        Action::Update => "updating",
        Action::Cancel => "deleting",
    }
}

pub fn success(request_id: &str, action: Action, external_code: &str) -> AlertResponse {
    AlertResponse {
        status: Some(success_status(action)),
        status_details: Some(with_request_id(
            request_id,
            &format!("EmployeeTime event {} successfully", past_tense(action)),
        )),
        entity_id: Some(external_code.to_string()),
        status_date: Some(Utc::now()),
        ..AlertResponse::default()
    }
}

/// Response for a failure before provider dispatch.
pub fn pipeline_failure(
    request_id: &str,
    external_code: Option<&str>,
    err: &SyncError,
) -> AlertResponse {
    AlertResponse {
        error_code: Some("500".to_string()),
        error_message: Some(with_request_id(
            request_id,
            &format!("Error processing EmployeeTime event: {err}"),
        )),
        entity_id: external_code.map(str::to_string),
        status_date: Some(Utc::now()),
        ..AlertResponse::default()
    }
}

/// Response for provider failures; one message line per failing provider.
///
/// The error code is the HTTP status of the last failing provider that
/// reported one, `500` otherwise.
pub fn provider_failure(
    request_id: &str,
    action: Action,
    external_code: &str,
    failures: &[&ProviderError],
) -> AlertResponse {
    let error_code = failures
        .iter()
        .rev()
        .find_map(|failure| failure.status)
        .map_or_else(|| "500".to_string(), |status| status.to_string());

    let error_message = failures
        .iter()
        .map(|failure| {
            with_request_id(
                request_id,
                &format!("Error {} out-of-office event: {failure}", gerund(action)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    AlertResponse {
        error_code: Some(error_code),
        error_message: Some(error_message),
        entity_id: Some(external_code.to_string()),
        status_date: Some(Utc::now()),
        ..AlertResponse::default()
    }
}

/// Response for a handler that failed as a whole.
pub fn handler_failure(request_id: &str, err: &SyncError) -> AlertResponse {
    AlertResponse {
        status: Some(500),
        error_code: Some("500".to_string()),
        error_message: Some(with_request_id(request_id, &err.to_string())),
        status_date: Some(Utc::now()),
        ..AlertResponse::default()
    }
}
