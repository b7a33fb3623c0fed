//! # eventhub-entity
//!
//! Domain entity models for EventHub. Every struct in this crate
//! represents a database table row, a joined read model, or a write
//! payload. Row types derive `sqlx::FromRow`.

pub mod attendee;
pub mod event;
pub mod session;
pub mod user;
