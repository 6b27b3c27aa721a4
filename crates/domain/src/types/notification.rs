//! Inbound notifications and the aggregated response sent back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named key identifying the entity a notification is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityKey {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl EntityKey {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: Some(value.into()) }
    }
}

/// One change notification. Keys are unordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    #[serde(default)]
    pub entity_keys: Vec<EntityKey>,
}

impl NotificationEvent {
    pub fn with_key(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { entity_keys: vec![EntityKey::new(name, value)] }
    }

    /// Value of the first key named `name` that carries a non-empty value.
    pub fn key(&self, name: &str) -> Option<&str> {
        self.entity_keys
            .iter()
            .filter(|key| key.name == name)
            .find_map(|key| key.value.as_deref().filter(|value| !value.is_empty()))
    }
}

/// Batch of notifications delivered in one call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationBatch {
    #[serde(default)]
    pub events: Vec<NotificationEvent>,
}

impl NotificationBatch {
    pub fn new(events: Vec<NotificationEvent>) -> Self {
        Self { events }
    }
}

/// Outcome of processing a batch (or one event of it).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_date: Option<DateTime<Utc>>,
}

impl AlertResponse {
    /// Fold `next` into `self`.
    ///
    /// Status details and error messages accumulate, each non-empty fragment
    /// followed by a newline. Every other field takes `next`'s value, even
    /// when that value is absent.
    #[must_use]
    pub fn merge(mut self, next: Self) -> Self {
        append_line(&mut self.status_details, next.status_details.as_deref());
        append_line(&mut self.error_message, next.error_message.as_deref());
        self.error_code = next.error_code;
        self.entity_id = next.entity_id;
        self.status = next.status;
        self.status_date = next.status_date;
        self
    }

    /// Reduce responses left to right, starting from an empty response.
    pub fn aggregate<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        responses.into_iter().fold(Self::default(), Self::merge)
    }

    pub fn is_error(&self) -> bool {
        self.error_code.is_some()
    }
}

fn append_line(target: &mut Option<String>, fragment: Option<&str>) {
    let Some(fragment) = fragment.filter(|text| !text.is_empty()) else {
        return;
    };
    let buffer = target.get_or_insert_with(String::new);
    buffer.push_str(fragment);
    buffer.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_appends_details_and_messages() {
        let success = AlertResponse {
            status_details: Some("created-test".into()),
            ..AlertResponse::default()
        };
        let failure = AlertResponse {
            error_message: Some("boom".into()),
            ..AlertResponse::default()
        };

        let aggregated = AlertResponse::aggregate([success, failure]);
        assert_eq!(aggregated.status_details.as_deref(), Some("created-test\n"));
        assert_eq!(aggregated.error_message.as_deref(), Some("boom\n"));
    }

    #[test]
    fn scalar_fields_are_last_writer_wins_including_absent() {
        let first = AlertResponse {
            status: Some(201),
            error_code: Some("500".into()),
            entity_id: Some("a".into()),
            ..AlertResponse::default()
        };
        let second = AlertResponse { status: Some(204), ..AlertResponse::default() };

        let aggregated = AlertResponse::aggregate([first, second]);
        assert_eq!(aggregated.status, Some(204));
        assert_eq!(aggregated.error_code, None);
        assert_eq!(aggregated.entity_id, None);
    }

    #[test]
    fn empty_fragments_are_skipped() {
        let aggregated = AlertResponse::aggregate([
            AlertResponse { status_details: Some("one".into()), ..AlertResponse::default() },
            AlertResponse { status_details: Some(String::new()), ..AlertResponse::default() },
            AlertResponse { status_details: Some("two".into()), ..AlertResponse::default() },
        ]);
        assert_eq!(aggregated.status_details.as_deref(), Some("one\ntwo\n"));
    }

    #[test]
    fn key_lookup_ignores_empty_values() {
        let event = NotificationEvent {
            entity_keys: vec![
                EntityKey { name: "externalCode".into(), value: Some(String::new()) },
                EntityKey::new("userId", "user-1"),
            ],
        };
        assert_eq!(event.key("externalCode"), None);
        assert_eq!(event.key("userId"), Some("user-1"));
    }

    #[test]
    fn batch_parses_camel_case_payload() {
        let batch: NotificationBatch = serde_json::from_str(
            r#"{"events":[{"entityKeys":[{"name":"externalCode","value":"42"}]}]}"#,
        )
        .unwrap();
        assert_eq!(batch.events[0].key("externalCode"), Some("42"));
    }
}
