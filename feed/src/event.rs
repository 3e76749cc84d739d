//! Wire types for the event listing
//!
//! Mirrors what GET /api/events serves. Fields this client does not
//! render (like `request_id`) are simply not declared.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Kind of activity an event record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    Push,
    PullRequest,
    Merge,
    /// Any action this client does not know how to render
    #[serde(other)]
    Unknown,
}

/// One event record as served by the API
#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub author: String,
    #[serde(default)]
    pub from_branch: Option<String>,
    pub to_branch: String,
    pub action: EventAction,
    pub timestamp: DateTime<Utc>,
}
