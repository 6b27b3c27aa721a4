//! Shared test helpers for `leavesync-core` integration tests.
//!
//! In-memory mocks for the record service and calendar providers plus
//! fixtures for leave records, so pipeline tests can focus on behaviour.

#![allow(dead_code)]

pub mod calendar;
pub mod repositories;

use chrono::{DateTime, Duration, FixedOffset};
use leavesync_domain::{ApprovalStatus, LeaveRecord, LeaveRecordSource, UserRef};

/// Leave record for `user_id` as the record service would return it.
///
/// `modified_after` is the gap between creation and last modification;
/// zero makes the record classify as a create.
pub fn leave_record(
    external_code: &str,
    user_id: &str,
    status: ApprovalStatus,
    modified_after: Duration,
) -> LeaveRecord {
    let created = at("2024-07-01T08:00:00Z");
    LeaveRecord::from_source(LeaveRecordSource {
        external_code: external_code.to_string(),
        user_id: user_id.to_string(),
        start_date: at("2024-07-15T00:00:00Z"),
        end_date: at("2024-07-19T00:00:00Z"),
        created_at: created,
        last_modified_at: created + modified_after,
        approval_status: status,
        comment: Some("Summer holiday".to_string()),
        time_type: Some("VACATION".to_string()),
        user: UserRef {
            user_id: user_id.to_string(),
            email: Some(format!("{user_id}@example.com")),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            time_zone: Some("Europe/Berlin".to_string()),
            ..UserRef::default()
        },
    })
}

pub fn approved(external_code: &str, user_id: &str) -> LeaveRecord {
    leave_record(external_code, user_id, ApprovalStatus::Approved, Duration::zero())
}

pub fn at(text: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(text).unwrap()
}
