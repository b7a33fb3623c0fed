//! Registration, login and logout.

pub mod service;

pub use service::{AuthOutcome, AuthService, Registration};
