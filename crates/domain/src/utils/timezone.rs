//! Time zone resolution for leave records.
//!
//! The upstream HR system reports wall-clock timestamps with an offset and
//! leaves the zone to the employee's job or personal settings. Zone names
//! may be IANA ids or the legacy three-letter ids that system still emits.

use chrono::{DateTime, Duration, FixedOffset, LocalResult, Offset, TimeZone};
use chrono_tz::Tz;
use tracing::warn;

use crate::types::UserRef;

/// Legacy short zone ids and the canonical zones they stand for.
const SHORT_IDS: &[(&str, &str)] = &[
    ("ACT", "Australia/Darwin"),
    ("AET", "Australia/Sydney"),
    ("AGT", "America/Argentina/Buenos_Aires"),
    ("ART", "Africa/Cairo"),
    ("AST", "America/Anchorage"),
    ("BET", "America/Sao_Paulo"),
    ("BST", "Asia/Dhaka"),
    ("CAT", "Africa/Harare"),
    ("CNT", "America/St_Johns"),
    ("CST", "America/Chicago"),
    ("CTT", "Asia/Shanghai"),
    ("EAT", "Africa/Addis_Ababa"),
    ("ECT", "Europe/Paris"),
    ("IET", "America/Indiana/Indianapolis"),
    ("IST", "Asia/Kolkata"),
    ("JST", "Asia/Tokyo"),
    ("MIT", "Pacific/Apia"),
    ("NET", "Asia/Yerevan"),
    ("NST", "Pacific/Auckland"),
    ("PLT", "Asia/Karachi"),
    ("PNT", "America/Phoenix"),
    ("PRT", "America/Puerto_Rico"),
    ("PST", "America/Los_Angeles"),
    ("SST", "Pacific/Guadalcanal"),
    ("VST", "Asia/Ho_Chi_Minh"),
];

/// Parse a zone name, honouring the legacy short ids.
pub fn parse_zone(name: &str) -> Option<Tz> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let canonical = SHORT_IDS
        .iter()
        .find(|(short, _)| short.eq_ignore_ascii_case(name))
        .map_or(name, |(_, zone)| *zone);

    canonical.parse::<Tz>().ok()
}

/// Resolve the zone for a user: job zone, then personal zone, then UTC.
pub fn resolve_user_zone(user: &UserRef) -> Tz {
    let candidates = [("job", user.job_time_zone.as_deref()), ("personal", user.time_zone.as_deref())];

    for (source, candidate) in candidates {
        let Some(name) = candidate.filter(|name| !name.trim().is_empty()) else {
            continue;
        };
        match parse_zone(name) {
            Some(zone) => return zone,
            None => warn!(user_id = %user.user_id, source, zone = name, "unrecognised time zone"),
        }
    }

    warn!(user_id = %user.user_id, "no usable time zone for user, falling back to UTC");
    Tz::UTC
}

/// Attach `zone` to the wall-clock time of `value` without converting the instant.
///
/// In an overlap the original offset is kept when it is valid, otherwise the
/// earlier offset wins. In a gap the time is pushed forward by one hour.
pub fn with_zone_keeping_local(value: DateTime<FixedOffset>, zone: Tz) -> DateTime<Tz> {
    let local = value.naive_local();

    match zone.from_local_datetime(&local) {
        LocalResult::Single(zoned) => zoned,
        LocalResult::Ambiguous(earlier, later) => {
            if later.offset().fix() == *value.offset() {
                later
            } else {
                earlier
            }
        }
        LocalResult::None => zone
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| zone.from_utc_datetime(&value.naive_utc())),
    }
}
