//! Google Calendar and Gmail wire types.

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use leavesync_domain::constants::OUT_OF_OFFICE_SUMMARY;
use leavesync_domain::{parse_zone, CalendarEvent, EventStatus, LeaveRecord};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Event body sent on insert and update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBody<'a> {
    pub id: &'a str,
    pub summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub start: EventDateTimeBody,
    pub end: EventDateTimeBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTimeBody {
    pub date_time: String,
    pub time_zone: String,
}

impl EventDateTimeBody {
    fn at(instant: &DateTime<Tz>) -> Self {
        Self { date_time: instant.to_rfc3339(), time_zone: instant.timezone().name().to_string() }
    }
}

impl<'a> EventBody<'a> {
    /// Out-of-office block covering `record`'s window.
    pub fn out_of_office(record: &'a LeaveRecord) -> Self {
        Self {
            id: &record.external_code,
            summary: OUT_OF_OFFICE_SUMMARY,
            description: record.comment.as_deref(),
            start: EventDateTimeBody::at(&record.start_date),
            end: EventDateTimeBody::at(&record.end_date),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage {
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEvent {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_link: Option<String>,
    #[serde(default)]
    pub start: Option<EventTime>,
    #[serde(default)]
    pub end: Option<EventTime>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub transparency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl EventTime {
    /// Instant in the event's own zone, else the calendar's.
    fn resolve(&self, calendar_zone: Tz) -> Option<(DateTime<Tz>, bool)> {
        let zone = self.time_zone.as_deref().and_then(parse_zone).unwrap_or(calendar_zone);

        if let Some(raw) = self.date_time.as_deref() {
            let parsed = DateTime::parse_from_rfc3339(raw).ok()?;
            return Some((parsed.with_timezone(&zone), false));
        }

        let day = NaiveDate::parse_from_str(self.date.as_deref()?, "%Y-%m-%d").ok()?;
        let midnight = zone.from_local_datetime(&day.and_hms_opt(0, 0, 0)?).earliest()?;
        Some((midnight, true))
    }
}

impl GoogleEvent {
    pub fn is_out_of_office_block(&self) -> bool {
        self.summary.as_deref() == Some(OUT_OF_OFFICE_SUMMARY)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status.as_deref() == Some("cancelled")
    }

    fn availability(&self) -> EventStatus {
        if self.event_type.as_deref() == Some("outOfOffice") {
            EventStatus::Oof
        } else if self.transparency.as_deref() == Some("transparent") {
            EventStatus::Free
        } else {
            EventStatus::Busy
        }
    }

    /// `None` when the event has no usable start or end.
    pub fn into_calendar_event(self, calendar_zone: Tz) -> Option<CalendarEvent> {
        let start = self.start.as_ref().and_then(|t| t.resolve(calendar_zone));
        let end = self.end.as_ref().and_then(|t| t.resolve(calendar_zone));
        let (Some((start, is_all_day)), Some((end, _))) = (start, end) else {
            warn!(event_id = %self.id, "skipping calendar event without usable start/end");
            return None;
        };
        let status = self.availability();

        Some(CalendarEvent {
            id: self.id,
            subject: self.summary,
            start,
            end,
            is_all_day,
            status,
            attendees_names: self.attendees.into_iter().filter_map(|a| a.display_name).collect(),
            body_text: self.description,
            web_link: self.html_link,
        })
    }
}

/// Gmail vacation responder settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationSettings {
    #[serde(default)]
    pub enable_auto_reply: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "int64_string")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "int64_string")]
    pub end_time: Option<i64>,
}

/// Gmail encodes int64 fields as JSON strings.
mod int64_string {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(v)) => Ok(Some(v)),
            Some(Raw::Text(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}
