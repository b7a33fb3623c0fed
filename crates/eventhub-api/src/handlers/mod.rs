//! HTTP request handlers grouped by resource.

pub mod attendee;
pub mod auth;
pub mod event;
pub mod health;
pub mod media;
pub mod upload;
