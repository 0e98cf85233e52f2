//! The durable event record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One event as replayed into a stream: identity, type and payload.
///
/// The store assigns a fresh position on append; only `event_id` carries the
/// original identity across a transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub event_id: String,
    pub event_type: String,
    pub data: Value,
}

impl EventRecord {
    pub fn new(event_id: impl Into<String>, event_type: impl Into<String>, data: Value) -> Self {
        Self {
            event_id: event_id.into(),
            event_type: event_type.into(),
            data,
        }
    }

    /// Parse one line of a record stream.
    ///
    /// Exported lines are full entry bodies with the record fields under
    /// `content`; a bare `{eventId, eventType, data}` object is accepted too.
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        let mut value: Value = serde_json::from_str(line)?;
        let content = value
            .get_mut("content")
            .filter(|content| content.is_object())
            .map(Value::take);
        serde_json::from_value(content.unwrap_or(value))
    }
}
