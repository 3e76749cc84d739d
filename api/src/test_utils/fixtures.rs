//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::entities::{Event, EventAction, EventId, NewEvent};

/// Create a stored push event with default values
pub fn test_event() -> Event {
    Event {
        id: EventId::new(),
        request_id: "def456".to_string(),
        author: "octocat".to_string(),
        action: EventAction::Push,
        from_branch: None,
        to_branch: "main".to_string(),
        timestamp: Utc.with_ymd_and_hms(2024, 3, 15, 13, 5, 0).unwrap(),
        created_at: Utc::now(),
    }
}

/// Create a stored event with a specific action and timestamp
pub fn test_event_at(action: EventAction, timestamp: DateTime<Utc>) -> Event {
    let from_branch = match action {
        EventAction::Push => None,
        _ => Some("feature".to_string()),
    };

    Event {
        id: EventId::new(),
        request_id: "req-1".to_string(),
        author: "octocat".to_string(),
        action,
        from_branch,
        to_branch: "main".to_string(),
        timestamp,
        created_at: Utc::now(),
    }
}

/// Create a push NewEvent with default values
pub fn new_push_event() -> NewEvent {
    NewEvent::push(
        "def456".to_string(),
        "octocat".to_string(),
        "main".to_string(),
        Utc.with_ymd_and_hms(2024, 3, 15, 13, 5, 0).unwrap(),
    )
}
