#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration};
use leavesync_api::{build_router, AppContext};
use leavesync_core::{CalendarProvider, LeaveRecordService};
use leavesync_domain::{
    Action, ApprovalStatus, CalendarEvent, Config, LeaveRecord, LeaveRecordSource, LeaveSyncError,
    LeaveWindowList, Result, SuccessFactorsConfig, UserRef,
};
use serde_json::Value;
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config {
        server: Default::default(),
        cache: Default::default(),
        successfactors: SuccessFactorsConfig {
            base_url: "http://successfactors.invalid/odata/v2".into(),
            username: "api".into(),
            password: "secret".into(),
            timeout_seconds: 1,
            max_attempts: 1,
        },
        google: None,
        logging: Default::default(),
    }
}

/// Leave record for `user-1`; `modified_minutes` after creation.
pub fn leave_record(code: &str, status: ApprovalStatus, modified_minutes: i64) -> LeaveRecord {
    let at = |text: &str| DateTime::parse_from_rfc3339(text).expect("valid timestamp");
    let created = at("2016-06-01T08:00:00Z");
    LeaveRecord::from_source(LeaveRecordSource {
        external_code: code.into(),
        user_id: "user-1".into(),
        start_date: at("2016-07-11T00:00:00Z"),
        end_date: at("2016-07-17T00:00:00Z"),
        created_at: created,
        last_modified_at: created + Duration::minutes(modified_minutes),
        approval_status: status,
        comment: None,
        time_type: None,
        user: UserRef {
            user_id: "user-1".into(),
            email: Some("ada@example.com".into()),
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            time_zone: Some("UTC".into()),
            job_time_zone: None,
            manager: None,
        },
    })
}

#[derive(Default)]
pub struct StubRecords {
    records: HashMap<String, LeaveRecord>,
    latest: Option<LeaveWindowList>,
}

impl StubRecords {
    pub fn with_record(mut self, record: LeaveRecord) -> Self {
        self.records.insert(record.external_code.clone(), record);
        self
    }

    pub fn with_latest(mut self, windows: LeaveWindowList) -> Self {
        self.latest = Some(windows);
        self
    }
}

#[async_trait]
impl LeaveRecordService for StubRecords {
    async fn get_by_id(&self, external_code: &str) -> Result<LeaveRecord> {
        self.records
            .get(external_code)
            .cloned()
            .ok_or_else(|| LeaveSyncError::NotFound(external_code.to_string()))
    }

    async fn get_latest_for_user(&self, _user_id: &str) -> Result<Option<LeaveWindowList>> {
        Ok(self.latest.clone())
    }
}

#[derive(Default)]
pub struct RecordingProvider {
    calls: Mutex<Vec<(Action, String)>>,
    events: Vec<CalendarEvent>,
    failure: Option<LeaveSyncError>,
}

impl RecordingProvider {
    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self { events, ..Self::default() }
    }

    pub fn failing(err: LeaveSyncError) -> Self {
        Self { failure: Some(err), ..Self::default() }
    }

    pub fn calls(&self) -> Vec<(Action, String)> {
        self.calls.lock().expect("calls mutex").clone()
    }

    fn record(&self, action: Action, record: &LeaveRecord) -> Result<()> {
        self.calls.lock().expect("calls mutex").push((action, record.external_code.clone()));
        self.failure.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl CalendarProvider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    async fn create(&self, record: &LeaveRecord) -> Result<()> {
        self.record(Action::Create, record)
    }

    async fn update(&self, record: &LeaveRecord) -> Result<()> {
        self.record(Action::Update, record)
    }

    async fn cancel(&self, record: &LeaveRecord) -> Result<()> {
        self.record(Action::Cancel, record)
    }

    async fn get_conflicting(&self, _windows: &[LeaveRecord]) -> Result<Vec<CalendarEvent>> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.events.clone()),
        }
    }
}

pub fn app(records: StubRecords, provider: Arc<RecordingProvider>) -> Router {
    let providers: Vec<Arc<dyn CalendarProvider>> = vec![provider as Arc<dyn CalendarProvider>];
    let ctx = AppContext::from_parts(test_config(), Arc::new(records), providers);
    build_router(Arc::new(ctx))
}

/// Drive one request through the router and decode the JSON body.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

pub fn notification(code: &str, request_id: &str) -> Request<Body> {
    let body = serde_json::json!({
        "events": [{"entityKeys": [{"name": "externalCode", "value": code}]}]
    });
    Request::post("/notifications")
        .header("content-type", "application/json")
        .header("x-request-id", request_id)
        .body(Body::from(body.to_string()))
        .expect("request")
}
