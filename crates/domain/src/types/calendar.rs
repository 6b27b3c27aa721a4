//! Calendar events returned by providers.

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

/// Availability shown by a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Free,
    Tentative,
    Busy,
    /// Out of office.
    Oof,
    WorkingElsewhere,
    Unknown,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Tentative => "tentative",
            Self::Busy => "busy",
            Self::Oof => "oof",
            Self::WorkingElsewhere => "workingelsewhere",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; anything unrecognised is `Unknown`.
impl FromStr for EventStatus {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_ascii_lowercase().as_str() {
            "free" => Self::Free,
            "tentative" => Self::Tentative,
            "busy" => Self::Busy,
            "oof" => Self::Oof,
            "workingelsewhere" => Self::WorkingElsewhere,
            _ => Self::Unknown,
        })
    }
}

impl<'de> Deserialize<'de> for EventStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(Self::Unknown))
    }
}

/// Event found in a user's calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(with = "zoned")]
    pub start: DateTime<Tz>,
    #[serde(with = "zoned")]
    pub end: DateTime<Tz>,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(rename = "showAs")]
    pub status: EventStatus,
    #[serde(default)]
    pub attendees_names: Vec<String>,
    #[serde(default)]
    pub body_text: Option<String>,
    #[serde(default)]
    pub web_link: Option<String>,
}

/// `{"dateTime": "2016-04-29T14:32:48", "timeZone": "America/Los_Angeles"}`
pub mod zoned {
    use chrono::{DateTime, NaiveDateTime, TimeZone};
    use chrono_tz::Tz;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::utils::timezone::parse_zone;

    const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct ZonedRepr {
        date_time: String,
        time_zone: String,
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error> {
        ZonedRepr {
            date_time: value.naive_local().format(LOCAL_FORMAT).to_string(),
            time_zone: value.timezone().name().to_string(),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Tz>, D::Error> {
        let repr = ZonedRepr::deserialize(deserializer)?;
        let zone = parse_zone(&repr.time_zone)
            .ok_or_else(|| D::Error::custom(format!("unknown time zone {}", repr.time_zone)))?;
        let local = NaiveDateTime::parse_from_str(&repr.date_time, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|err| D::Error::custom(format!("invalid dateTime {}: {err}", repr.date_time)))?;
        zone.from_local_datetime(&local).earliest().ok_or_else(|| {
            D::Error::custom(format!("{} does not exist in {}", repr.date_time, repr.time_zone))
        })
    }
}
