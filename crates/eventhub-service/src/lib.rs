//! # eventhub-service
//!
//! Business logic service layer for EventHub. Each service orchestrates
//! repositories, media storage, sessions and the domain event bus to
//! implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod attendee;
pub mod auth;
pub mod banner;
pub mod context;
pub mod event;

pub use attendee::AttendeeService;
pub use auth::AuthService;
pub use banner::BannerService;
pub use context::RequestContext;
pub use event::EventService;
