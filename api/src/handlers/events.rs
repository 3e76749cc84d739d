//! Event endpoints
//!
//! The stored-event listing consumed by the feed client, plus the
//! store connectivity probe.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::domain::entities::Event;
use crate::error::AppError;
use crate::AppState;

/// Wire representation of a stored event
///
/// The internal id and arrival time stay server-side.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub request_id: String,
    pub author: String,
    pub action: String,
    pub from_branch: Option<String>,
    pub to_branch: String,
    pub timestamp: String,
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            request_id: event.request_id.clone(),
            author: event.author.clone(),
            action: event.action.to_string(),
            from_branch: event.from_branch.clone(),
            to_branch: event.to_branch.clone(),
            timestamp: event.timestamp.to_rfc3339(),
        }
    }
}

/// GET /api/events
///
/// All stored events in insertion order. Sorting for display is the
/// feed client's job.
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = state.event_service.list_events().await?;
    Ok(Json(events.iter().map(EventResponse::from).collect()))
}

/// GET /test-db
///
/// Insert a probe record to confirm the store is reachable.
pub async fn insert_test_event(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.event_service.record_test_event().await?;
    Ok("Inserted test event!")
}
