//! Event catalog: ownership and scheduling rules plus CRUD orchestration.

pub mod rules;
pub mod service;

pub use rules::{JoinSnapshot, OwnerAction};
pub use service::{EventService, NewEvent};
