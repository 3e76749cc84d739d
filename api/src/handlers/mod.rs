//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod events;
pub mod webhooks;

pub use events::{insert_test_event, list_events};
pub use webhooks::github_webhook;
