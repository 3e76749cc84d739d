//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., SQLite).

use async_trait::async_trait;

use crate::domain::entities::{Event, NewEvent};
use crate::error::DomainError;

/// Repository for stored activity events
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new event
    async fn insert(&self, event: &NewEvent) -> Result<Event, DomainError>;

    /// All stored events, in insertion order
    async fn list_all(&self) -> Result<Vec<Event>, DomainError>;
}
