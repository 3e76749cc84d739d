//! Domain entities
//!
//! Pure domain models representing core business concepts.

pub mod event;

pub use event::{Event, EventAction, EventId, NewEvent};
