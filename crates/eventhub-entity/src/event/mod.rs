//! Event domain entities.

pub mod model;
pub mod patch;

pub use model::{CreateEvent, Event, EventWithStats};
pub use patch::UpdateEvent;
