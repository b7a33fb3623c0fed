//! # eventhub-database
//!
//! PostgreSQL connection management, embedded migrations and concrete
//! repository implementations for all EventHub entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
