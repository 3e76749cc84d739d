//! Domain layer
//!
//! Pure business logic with no external dependencies.
//! - `entities`: Domain models for repository activity
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
