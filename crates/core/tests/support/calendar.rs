use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::TimeZone;
use leavesync_core::CalendarProvider;
use leavesync_domain::{
    Action, CalendarEvent, EventStatus, LeaveRecord, LeaveSyncError, Result as DomainResult,
};

/// Calendar provider mock that records every call.
#[derive(Clone)]
pub struct RecordingCalendarProvider {
    name: String,
    calls: Arc<Mutex<Vec<(Action, String)>>>,
    conflict_queries: Arc<Mutex<usize>>,
    failure: Option<LeaveSyncError>,
    events: Vec<CalendarEvent>,
}

impl RecordingCalendarProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            conflict_queries: Arc::new(Mutex::new(0)),
            failure: None,
            events: Vec::new(),
        }
    }

    /// Every call fails with `err`.
    pub fn failing(mut self, err: LeaveSyncError) -> Self {
        self.failure = Some(err);
        self
    }

    /// Events returned by `get_conflicting`.
    pub fn with_events(mut self, events: Vec<CalendarEvent>) -> Self {
        self.events = events;
        self
    }

    /// `(action, external_code)` for every create/update/cancel call.
    pub fn calls(&self) -> Vec<(Action, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn conflict_queries(&self) -> usize {
        *self.conflict_queries.lock().unwrap()
    }

    fn record_call(&self, action: Action, record: &LeaveRecord) -> DomainResult<()> {
        self.calls.lock().unwrap().push((action, record.external_code.clone()));
        self.failure.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl CalendarProvider for RecordingCalendarProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create(&self, record: &LeaveRecord) -> DomainResult<()> {
        self.record_call(Action::Create, record)
    }

    async fn update(&self, record: &LeaveRecord) -> DomainResult<()> {
        self.record_call(Action::Update, record)
    }

    async fn cancel(&self, record: &LeaveRecord) -> DomainResult<()> {
        self.record_call(Action::Cancel, record)
    }

    async fn get_conflicting(&self, _windows: &[LeaveRecord]) -> DomainResult<Vec<CalendarEvent>> {
        *self.conflict_queries.lock().unwrap() += 1;
        if let Some(err) = self.failure.clone() {
            return Err(err);
        }
        Ok(self.events.clone())
    }
}

/// Calendar event fixture in Europe/Berlin.
pub fn calendar_event(id: &str, status: EventStatus) -> CalendarEvent {
    let zone = chrono_tz::Europe::Berlin;
    CalendarEvent {
        id: id.to_string(),
        subject: Some(format!("Meeting {id}")),
        start: zone.with_ymd_and_hms(2024, 7, 16, 10, 0, 0).unwrap(),
        end: zone.with_ymd_and_hms(2024, 7, 16, 11, 0, 0).unwrap(),
        is_all_day: false,
        status,
        attendees_names: vec!["Test User".to_string()],
        body_text: None,
        web_link: None,
    }
}
