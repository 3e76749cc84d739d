//! Event service
//!
//! Application-level operations over the event store: recording
//! normalized webhook deliveries and listing them for the feed client.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{Event, EventAction, NewEvent};
use crate::domain::ports::EventRepository;
use crate::error::AppError;

/// Service for recording and listing activity events
pub struct EventService<R: EventRepository> {
    events: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(events: Arc<R>) -> Self {
        Self { events }
    }

    /// Store a normalized webhook event
    pub async fn record(&self, event: NewEvent) -> Result<Event, AppError> {
        let stored = self.events.insert(&event).await?;

        tracing::info!(
            id = %stored.id,
            action = %stored.action,
            author = %stored.author,
            to_branch = %stored.to_branch,
            "Event recorded"
        );

        Ok(stored)
    }

    /// All stored events, in insertion order
    pub async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        Ok(self.events.list_all().await?)
    }

    /// Insert the fixed probe record used to confirm store connectivity
    pub async fn record_test_event(&self) -> Result<Event, AppError> {
        self.record(NewEvent {
            request_id: "test123".to_string(),
            author: "system".to_string(),
            action: EventAction::Other("TEST".to_string()),
            from_branch: None,
            to_branch: "main".to_string(),
            timestamp: Utc::now(),
        })
        .await
    }
}
