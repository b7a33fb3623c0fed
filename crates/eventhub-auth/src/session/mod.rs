//! Cookie session lifecycle.

pub mod manager;
pub mod token;

pub use manager::{IssuedSession, SessionManager, ValidatedSession};
