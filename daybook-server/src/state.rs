//! Shared application state.

use std::collections::HashMap;
use std::sync::Arc;

use daybook_core::Event;
use tokio::sync::RwLock;

/// Shared application state: an in-memory event store keyed by event id.
///
/// Only base events live here. Occurrences produced by the recurrence engine
/// exist in query responses and are never written back.
#[derive(Clone, Default)]
pub struct AppState {
    events: Arc<RwLock<HashMap<String, Event>>>,
}

impl AppState {
    pub fn new() -> Self {
        AppState::default()
    }

    pub async fn insert_event(&self, event: Event) {
        self.events.write().await.insert(event.id.clone(), event);
    }

    /// A user's base events, in no particular order.
    pub async fn events_for_user(&self, user_id: &str) -> Vec<Event> {
        self.events
            .read()
            .await
            .values()
            .filter(|e| e.user_id == user_id && !e.is_recurring_instance)
            .cloned()
            .collect()
    }

    /// Look up an event, checking that `user_id` owns it.
    pub async fn event_for_user(&self, user_id: &str, event_id: &str) -> Option<Event> {
        self.events
            .read()
            .await
            .get(event_id)
            .filter(|e| e.user_id == user_id)
            .cloned()
    }

    /// Remove an event if `user_id` owns it; returns whether anything was removed.
    pub async fn remove_event(&self, user_id: &str, event_id: &str) -> bool {
        let mut events = self.events.write().await;
        match events.get(event_id) {
            Some(e) if e.user_id == user_id => {
                events.remove(event_id);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, user_id: &str) -> Event {
        Event {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: "Review".to_string(),
            description: None,
            location: None,
            category: None,
            color: None,
            start_date: Utc.with_ymd_and_hms(2024, 5, 6, 10, 0, 0).unwrap(),
            duration: 60,
            recurrence: None,
            is_recurring_instance: false,
            parent_event_id: None,
        }
    }

    #[tokio::test]
    async fn test_events_are_scoped_to_their_owner() {
        let state = AppState::new();
        state.insert_event(event("a", "alice")).await;
        state.insert_event(event("b", "bob")).await;

        let alices = state.events_for_user("alice").await;
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].id, "a");

        assert!(state.event_for_user("alice", "b").await.is_none());
        assert!(state.event_for_user("bob", "b").await.is_some());
    }

    #[tokio::test]
    async fn test_remove_event_checks_ownership() {
        let state = AppState::new();
        state.insert_event(event("a", "alice")).await;

        assert!(!state.remove_event("bob", "a").await);
        assert!(state.remove_event("alice", "a").await);
        assert!(state.events_for_user("alice").await.is_empty());
    }
}
