//! Attendance: join, leave and listings.

pub mod service;

pub use service::AttendeeService;
