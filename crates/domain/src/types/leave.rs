//! Leave records and their classification.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, FixedOffset};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::LeaveSyncError;
use crate::utils::timezone::{resolve_user_zone, with_zone_keeping_local};

/// Approval state reported by the HR system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    PendingCancellation,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
            Self::PendingCancellation => "PENDING_CANCELLATION",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = LeaveSyncError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELLED" => Ok(Self::Cancelled),
            "PENDING_CANCELLATION" => Ok(Self::PendingCancellation),
            other => Err(LeaveSyncError::InvalidInput(format!("unknown approval status: {other}"))),
        }
    }
}

/// What a notification means for downstream calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Create,
    Update,
    Cancel,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Cancel => "CANCEL",
        })
    }
}

/// Employee (or manager) referenced by a leave record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRef {
    pub user_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Personal time zone setting.
    pub time_zone: Option<String>,
    /// Time zone of the employee's current job assignment.
    pub job_time_zone: Option<String>,
    pub manager: Option<Box<UserRef>>,
}

impl UserRef {
    /// "First Last", skipping whichever part is missing.
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A leave record exactly as the HR system reports it (wall clock + offset).
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveRecordSource {
    pub external_code: String,
    pub user_id: String,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    pub created_at: DateTime<FixedOffset>,
    pub last_modified_at: DateTime<FixedOffset>,
    pub approval_status: ApprovalStatus,
    pub comment: Option<String>,
    pub time_type: Option<String>,
    pub user: UserRef,
}

/// Time-off request for one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveRecord {
    /// Stable identifier assigned by the HR system.
    pub external_code: String,
    pub user_id: String,
    pub start_date: DateTime<Tz>,
    /// Exclusive end; already shifted by the one-day correction.
    pub end_date: DateTime<Tz>,
    pub created_at: DateTime<Tz>,
    pub last_modified_at: DateTime<Tz>,
    pub approval_status: ApprovalStatus,
    pub comment: Option<String>,
    pub time_type: Option<String>,
    pub user: UserRef,
    /// Set by classification; never part of the source payload.
    pub action: Option<Action>,
}

impl LeaveRecord {
    /// Build a record from source data.
    ///
    /// The user's zone is attached to every timestamp keeping the reported
    /// wall-clock time, and the end date is moved one day later: the HR
    /// system reports the last day of leave where calendars expect the first
    /// day back.
    pub fn from_source(source: LeaveRecordSource) -> Self {
        let zone = resolve_user_zone(&source.user);
        // Shift the wall clock first so a DST gap on the new day still lands on it.
        let shifted_end = source.end_date.checked_add_days(Days::new(1)).unwrap_or(source.end_date);
        let end_date = with_zone_keeping_local(shifted_end, zone);

        Self {
            external_code: source.external_code,
            user_id: source.user_id,
            start_date: with_zone_keeping_local(source.start_date, zone),
            end_date,
            created_at: with_zone_keeping_local(source.created_at, zone),
            last_modified_at: with_zone_keeping_local(source.last_modified_at, zone),
            approval_status: source.approval_status,
            comment: source.comment,
            time_type: source.time_type,
            user: source.user,
            action: None,
        }
    }

    /// Same record with the given action assigned.
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Zone shared by all timestamps of the record.
    pub fn zone(&self) -> Tz {
        self.start_date.timezone()
    }
}

/// Leave windows currently relevant for one user. Order is irrelevant and
/// duplicates are allowed.
pub type LeaveWindowList = Vec<LeaveRecord>;
