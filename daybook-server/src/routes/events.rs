//! Event endpoints: base-event CRUD plus the expanded range view.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use daybook_core::{DateRange, Event, RecurrenceRule, events_in_range};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{user_id}/events",
            get(list_events).post(create_event),
        )
        .route("/users/{user_id}/events/range", get(events_range))
        .route(
            "/users/{user_id}/events/{event_id}",
            get(get_event).delete(delete_event),
        )
}

/// GET /users/:user_id/events - List a user's base events
async fn list_events(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<Event>> {
    Json(state.events_for_user(&user_id).await)
}

/// Request body for creating an event
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub start_date: DateTime<Utc>,
    /// Event length in minutes
    pub duration: i64,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub recurrence: Option<RecurrenceRule>,
}

/// POST /users/:user_id/events - Create a new base event
async fn create_event(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<CreateEventRequest>,
) -> Json<Event> {
    let event = Event {
        id: Uuid::new_v4().to_string(),
        user_id,
        title: req.title,
        description: req.description,
        location: req.location,
        category: req.category,
        color: req.color,
        start_date: req.start_date,
        duration: req.duration,
        recurrence: req.recurrence,
        is_recurring_instance: false,
        parent_event_id: None,
    };

    state.insert_event(event.clone()).await;

    Json(event)
}

/// Query parameters for the range view
#[derive(Deserialize)]
struct RangeParams {
    start: String,
    end: String,
}

/// GET /users/:user_id/events/range?start=...&end=... - Events in a date
/// range, with recurring events expanded into their occurrences
async fn events_range(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Vec<Event>>, AppError> {
    let range = DateRange::parse(&params.start, &params.end).map_err(AppError::bad_request)?;
    if range.start > range.end {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "Range start {} is after range end {}",
            range.start,
            range.end
        )));
    }

    let events = state.events_for_user(&user_id).await;
    let expanded = events_in_range(&events, &range)?;

    Ok(Json(expanded))
}

/// GET /users/:user_id/events/:event_id - Fetch one base event
async fn get_event(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(String, String)>,
) -> Result<Json<Event>, AppError> {
    state
        .event_for_user(&user_id, &event_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Event not found: {event_id}")))
}

/// DELETE /users/:user_id/events/:event_id - Delete a base event
async fn delete_event(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    if state.remove_event(&user_id, &event_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("Event not found: {event_id}")))
    }
}
