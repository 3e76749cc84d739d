//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::entities::{Event, EventId, NewEvent};
use crate::domain::ports::EventRepository;
use crate::error::DomainError;

/// In-memory event repository
#[derive(Default)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<Vec<Event>>>,
    fail: bool,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an event for testing
    pub fn with_event(self, event: Event) -> Self {
        self.events.write().unwrap().push(event);
        self
    }

    /// A repository whose every call fails with a database error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn insert(&self, new_event: &NewEvent) -> Result<Event, DomainError> {
        if self.fail {
            return Err(DomainError::Database("injected failure".to_string()));
        }

        let event = Event {
            id: EventId::new(),
            request_id: new_event.request_id.clone(),
            author: new_event.author.clone(),
            action: new_event.action.clone(),
            from_branch: new_event.from_branch.clone(),
            to_branch: new_event.to_branch.clone(),
            timestamp: new_event.timestamp,
            created_at: Utc::now(),
        };

        self.events.write().unwrap().push(event.clone());
        Ok(event)
    }

    async fn list_all(&self) -> Result<Vec<Event>, DomainError> {
        if self.fail {
            return Err(DomainError::Database("injected failure".to_string()));
        }

        Ok(self.events.read().unwrap().clone())
    }
}
