//! OData v2 JSON date literals (`/Date(1468195200000+0200)/`).

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};

static ODATA_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/Date\(([0-9]+)([-+][0-9]+)?\)/").expect("ODATA_DATE should compile - this is a bug")
});

/// Parse an OData date literal; a missing offset means UTC.
pub fn parse_odata_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let captures = ODATA_DATE.captures(raw)?;
    let millis: i64 = captures.get(1)?.as_str().parse().ok()?;
    let offset = match captures.get(2) {
        Some(m) => parse_offset(m.as_str())?,
        None => FixedOffset::east_opt(0)?,
    };

    let instant = Utc.timestamp_millis_opt(millis).single()?;
    Some(instant.with_timezone(&offset))
}

/// `+hh`, `+hhmm` or `-hhmm`.
fn parse_offset(raw: &str) -> Option<FixedOffset> {
    if !raw.is_ascii() {
        return None;
    }
    let (sign, digits) = raw.split_at(1);
    let sign = if sign == "-" { -1 } else { 1 };
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 18 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// serde adapter for `#[serde(deserialize_with = ...)]`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_odata_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("Invalid DateTime format {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_utc_literal() {
        let parsed = parse_odata_date("/Date(1468195200000)/").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert_eq!(parsed.to_rfc3339(), "2016-07-11T00:00:00+00:00");
    }

    #[test]
    fn keeps_declared_offset() {
        let parsed = parse_odata_date("/Date(1468195200000+0200)/").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 7200);
        assert_eq!(parsed.to_rfc3339(), "2016-07-11T02:00:00+02:00");

        let negative = parse_odata_date("/Date(1468195200000-0530)/").unwrap();
        assert_eq!(negative.offset().local_minus_utc(), -(5 * 3600 + 30 * 60));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_odata_date("2016-07-11").is_none());
        assert!(parse_odata_date("/Date(abc)/").is_none());
        assert!(parse_odata_date("/Date(1468195200000+123)/").is_none());
    }

    #[test]
    fn rejects_non_ascii_digits() {
        assert!(parse_odata_date("/Date(1468195200000+1\u{0661}2)/").is_none());
        assert!(parse_odata_date("/Date(\u{0661}468195200000)/").is_none());

        #[derive(Debug, Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deserialize")]
            #[allow(dead_code)]
            at: DateTime<FixedOffset>,
        }

        let err = serde_json::from_str::<Holder>(r#"{"at":"/Date(1468195200000+1\u06612)/"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid DateTime format"));
    }

    #[test]
    fn deserializer_reports_raw_value() {
        #[derive(Debug, Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deserialize")]
            #[allow(dead_code)]
            at: DateTime<FixedOffset>,
        }

        let err = serde_json::from_str::<Holder>(r#"{"at":"yesterday"}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid DateTime format yesterday"));
    }
}
