//! Repository activity event domain entity
//!
//! One record per webhook delivery worth keeping: pushes, opened pull
//! requests, and merges. The feed client renders these newest-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Unique identifier for a stored event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EventId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happened on the repository
///
/// The webhook handler only produces the three known variants; `Other`
/// carries anything else that ends up in the store (the connectivity
/// probe writes `TEST`) so listing never fails on an odd row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventAction {
    /// Commits pushed to a branch
    Push,
    /// Pull request opened
    PullRequest,
    /// Pull request merged
    Merge,
    /// Any action outside the known set, kept verbatim
    Other(String),
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Push => write!(f, "PUSH"),
            EventAction::PullRequest => write!(f, "PULL_REQUEST"),
            EventAction::Merge => write!(f, "MERGE"),
            EventAction::Other(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for EventAction {
    fn from(s: &str) -> Self {
        match s {
            "PUSH" => EventAction::Push,
            "PULL_REQUEST" => EventAction::PullRequest,
            "MERGE" => EventAction::Merge,
            _ => EventAction::Other(s.to_string()),
        }
    }
}

impl Serialize for EventAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EventAction::from(s.as_str()))
    }
}

/// A stored repository activity event
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: EventId,
    /// Delivery identity from GitHub: head commit SHA for pushes, PR id otherwise
    pub request_id: String,
    pub author: String,
    pub action: EventAction,
    /// Source branch; absent for pushes
    pub from_branch: Option<String>,
    pub to_branch: String,
    /// When the activity happened, not when the webhook arrived
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Data needed to store a new event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub request_id: String,
    pub author: String,
    pub action: EventAction,
    pub from_branch: Option<String>,
    pub to_branch: String,
    pub timestamp: DateTime<Utc>,
}

impl NewEvent {
    pub fn push(
        request_id: String,
        author: String,
        to_branch: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id,
            author,
            action: EventAction::Push,
            from_branch: None,
            to_branch,
            timestamp,
        }
    }

    pub fn pull_request(
        request_id: String,
        author: String,
        from_branch: String,
        to_branch: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id,
            author,
            action: EventAction::PullRequest,
            from_branch: Some(from_branch),
            to_branch,
            timestamp,
        }
    }

    pub fn merge(
        request_id: String,
        author: String,
        from_branch: String,
        to_branch: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id,
            author,
            action: EventAction::Merge,
            from_branch: Some(from_branch),
            to_branch,
            timestamp,
        }
    }
}
