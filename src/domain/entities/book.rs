//! Book entity and its closed category classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed classification tag on a [`Book`], used for statistics grouping.
///
/// Stored as its upper-case name (e.g. `"COMPUTER"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookCategory {
    Computer,
    Economy,
    Society,
    Language,
    Science,
}

impl BookCategory {
    pub const ALL: [BookCategory; 5] = [
        BookCategory::Computer,
        BookCategory::Economy,
        BookCategory::Society,
        BookCategory::Language,
        BookCategory::Science,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookCategory::Computer => "COMPUTER",
            BookCategory::Economy => "ECONOMY",
            BookCategory::Society => "SOCIETY",
            BookCategory::Language => "LANGUAGE",
            BookCategory::Science => "SCIENCE",
        }
    }
}

impl fmt::Display for BookCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored or supplied category name is not one of [`BookCategory::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown book category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for BookCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A registered book.
///
/// Names are not unique: several books may share one name, and loans refer to
/// books by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub category: Option<BookCategory>,
}

impl Book {
    pub fn new(id: i64, name: String, category: Option<BookCategory>) -> Self {
        Self { id, name, category }
    }
}

/// Input data for registering a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub name: String,
    pub category: Option<BookCategory>,
}

/// Number of books carrying one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: BookCategory,
    pub count: i64,
}
