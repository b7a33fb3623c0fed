//! Sorting types for list endpoints.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sortable fields of the public event listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSortField {
    /// The event date.
    #[default]
    Date,
    /// The creation timestamp.
    Created,
    /// The event title.
    Title,
}

impl EventSortField {
    /// Return the qualified column this field sorts on.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Date => "e.date",
            Self::Created => "e.created_at",
            Self::Title => "e.title",
        }
    }
}
