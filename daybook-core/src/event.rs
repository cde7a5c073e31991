//! Calendar event types.
//!
//! Base events and the occurrences generated from them share one shape, the
//! same way the documents are stored: an occurrence is just an event tagged
//! `isRecurringInstance` that points back at its parent. Occurrences are
//! never persisted; they only exist in query responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recurrence::RecurrenceRule;

/// A calendar event.
///
/// Wire field names are camelCase to match the JSON documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    /// Owner of the event; copied through to occurrences untouched.
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    /// Start of the event. For recurring events this is also the anchor the
    /// recurrence rule counts from.
    pub start_date: DateTime<Utc>,
    /// Event length in minutes.
    pub duration: i64,
    /// Recurrence rule; absent means the event happens exactly once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
    /// True only on generated occurrences.
    #[serde(default)]
    pub is_recurring_instance: bool,
    /// Id of the base event an occurrence was generated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_event_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_event_json_field_names_are_camel_case() {
        let event = Event {
            id: "evt-1".to_string(),
            user_id: "user-1".to_string(),
            title: "Dentist".to_string(),
            description: None,
            location: None,
            category: None,
            color: None,
            start_date: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
            duration: 45,
            recurrence: None,
            is_recurring_instance: false,
            parent_event_id: None,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["startDate"], "2024-01-15T09:00:00Z");
        assert_eq!(json["isRecurringInstance"], false);
        // Absent optionals stay off the wire entirely
        assert!(json.get("recurrence").is_none());
        assert!(json.get("parentEventId").is_none());
    }

    #[test]
    fn test_event_json_defaults_missing_instance_fields() {
        let json = r#"{
            "id": "evt-2",
            "userId": "user-1",
            "title": "One-off",
            "description": null,
            "location": null,
            "category": null,
            "color": null,
            "startDate": "2024-03-01T08:00:00Z",
            "duration": 30
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert!(!event.is_recurring_instance);
        assert!(event.recurrence.is_none());
        assert!(event.parent_event_id.is_none());
    }
}
