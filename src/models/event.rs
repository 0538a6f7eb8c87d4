//! Calendar events.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::Recipient;

/// An event in a user or group calendar.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Option<String>,
    pub subject: Option<String>,
    pub body: Option<ItemBody>,
    pub body_preview: Option<String>,
    pub start: Option<DateTimeTimeZone>,
    pub end: Option<DateTimeTimeZone>,
    pub location: Option<Location>,
    pub is_all_day: Option<bool>,
    pub is_cancelled: Option<bool>,
    pub organizer: Option<Recipient>,
    pub web_link: Option<String>,
    pub created_date_time: Option<DateTime<Utc>>,
    pub last_modified_date_time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// A wall-clock time paired with a time zone name.
///
/// Graph sends `dateTime` without an offset (`2024-04-01T09:00:00.0000000`);
/// the zone is carried separately.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeTimeZone {
    pub date_time: String,
    pub time_zone: Option<String>,
}

impl DateTimeTimeZone {
    pub fn new(date_time: NaiveDateTime, time_zone: impl Into<String>) -> Self {
        Self {
            date_time: date_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            time_zone: Some(time_zone.into()),
        }
    }

    /// Parse the wall-clock part, ignoring the zone.
    pub fn naive(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.date_time, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

/// Content type of an [`ItemBody`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Text,
    Html,
}

/// Rich text body of an event or message.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub content_type: Option<BodyType>,
    pub content: Option<String>,
}

impl ItemBody {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content_type: Some(BodyType::Text),
            content: Some(content.into()),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub display_name: Option<String>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_from_graph_payload() {
        let event: Event = serde_json::from_value(json!({
            "id": "e1",
            "subject": "Planning",
            "body": {"contentType": "html", "content": "<p>agenda</p>"},
            "start": {"dateTime": "2024-04-01T09:00:00.0000000", "timeZone": "UTC"},
            "end": {"dateTime": "2024-04-01T10:00:00.0000000", "timeZone": "UTC"},
            "location": {"displayName": "Room 1"},
            "isAllDay": false
        }))
        .unwrap();

        assert_eq!(event.body.unwrap().content_type, Some(BodyType::Html));
        let start = event.start.unwrap().naive().unwrap();
        assert_eq!(start.format("%H:%M").to_string(), "09:00");
        assert_eq!(event.location.unwrap().display_name.as_deref(), Some("Room 1"));
    }

    #[test]
    fn test_new_event_serializes_only_set_fields() {
        let start = NaiveDateTime::parse_from_str("2024-04-01T09:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();
        let event = Event {
            subject: Some("Standup".to_string()),
            body: Some(ItemBody::text("daily")),
            start: Some(DateTimeTimeZone::new(start, "Pacific Standard Time")),
            ..Default::default()
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "subject": "Standup",
                "body": {"contentType": "text", "content": "daily"},
                "start": {"dateTime": "2024-04-01T09:00:00", "timeZone": "Pacific Standard Time"}
            })
        );
    }
}
