//! # eventhub-auth
//!
//! Authentication primitives for EventHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `session`: Opaque cookie tokens and the session lifecycle
//!   (create, validate with sliding renewal, invalidate)

pub mod password;
pub mod session;

pub use password::PasswordHasher;
pub use session::{IssuedSession, SessionManager, ValidatedSession};
