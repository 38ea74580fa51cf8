use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PollerError;

/// Event identity. Dedup compares identifiers only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// String ids are used verbatim; other scalars by their JSON text.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One notification event.
///
/// The full upstream record is kept and handed to the sink untouched;
/// `id` and `created` are extracted for filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "Map<String, Value>")]
pub struct Event {
    id: EventId,
    created: String,
    record: Map<String, Value>,
}

impl Event {
    pub fn id(&self) -> &EventId {
        &self.id
    }

    /// Creation timestamp as sent by the API (date or date-time string).
    pub fn created(&self) -> &str {
        &self.created
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn into_payload(self) -> Map<String, Value> {
        self.record
    }
}

impl TryFrom<Map<String, Value>> for Event {
    type Error = PollerError;

    fn try_from(record: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = record
            .get("id")
            .and_then(EventId::from_value)
            .ok_or_else(|| PollerError::MalformedResponse("event missing id".to_string()))?;
        let created = record
            .get("created")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                PollerError::MalformedResponse(format!("event {id} missing created"))
            })?;
        Ok(Self {
            id,
            created,
            record,
        })
    }
}

impl From<Event> for Map<String, Value> {
    fn from(event: Event) -> Self {
        event.record
    }
}

/// Success body of the events endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsPage {
    pub data: Vec<Map<String, Value>>,
}

impl EventsPage {
    /// Validate every record, preserving API order.
    pub fn into_events(self) -> Result<Vec<Event>, PollerError> {
        self.data.into_iter().map(Event::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn event_keeps_the_full_record() {
        let raw = json!({
            "id": "evt-1",
            "created": "2024-01-02T10:11:12.000000",
            "bundle": "rhel",
            "payload": { "severity": "high" }
        });
        let event = Event::try_from(record(raw.clone())).unwrap();

        assert_eq!(event.id().as_str(), "evt-1");
        assert_eq!(event.created(), "2024-01-02T10:11:12.000000");
        assert_eq!(serde_json::to_value(&event).unwrap(), raw);
    }

    #[test]
    fn numeric_ids_use_their_json_text() {
        let event = Event::try_from(record(json!({ "id": 42, "created": "2024-01-02" }))).unwrap();
        assert_eq!(event.id(), &EventId::new("42"));
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = Event::try_from(record(json!({ "created": "2024-01-02" }))).unwrap_err();
        assert!(matches!(err, PollerError::MalformedResponse(_)));

        let err = Event::try_from(record(json!({ "id": "a" }))).unwrap_err();
        match err {
            PollerError::MalformedResponse(message) => assert!(message.contains("created")),
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn page_without_data_fails_to_parse() {
        assert!(serde_json::from_value::<EventsPage>(json!({ "meta": {} })).is_err());
    }

    #[test]
    fn page_preserves_api_order() {
        let page: EventsPage = serde_json::from_value(json!({
            "data": [
                { "id": "b", "created": "2024-01-02" },
                { "id": "a", "created": "2024-01-01" }
            ]
        }))
        .unwrap();
        let ids: Vec<String> = page
            .into_events()
            .unwrap()
            .into_iter()
            .map(|e| e.id().to_string())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
