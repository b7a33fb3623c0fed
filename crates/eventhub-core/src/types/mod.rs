//! Core type definitions used across the EventHub workspace.

pub mod id;
pub mod pagination;
pub mod sorting;

pub use id::*;
pub use pagination::{Page, PageRequest, PaginationMeta};
pub use sorting::{EventSortField, SortDirection};
