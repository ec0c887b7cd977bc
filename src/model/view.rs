//! View state - search text, sort configuration and current page
//!
//! `ViewState` is a value: every user action produces a new state through
//! one of the transition functions below, so the page invariants are kept
//! in a single place.

use super::row::Column;
use std::fmt;

/// Sort direction for the active column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// Column and direction governing row order
///
/// With no key set, rows keep their input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub key: Option<Column>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: Column, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Sort arrow for a column header, if that column is the active key
    pub fn indicator(&self, column: Column) -> Option<&'static str> {
        (self.key == Some(column)).then(|| self.direction.arrow())
    }
}

/// Interdependent view state of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_text: String,
    pub sort: SortConfig,
    pub current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            sort: SortConfig::default(),
            current_page: 1,
        }
    }
}

impl ViewState {
    /// Replace the search text. The page returns to 1 on any change.
    pub fn with_search(&self, text: impl Into<String>) -> Self {
        let text = text.into();
        if text == self.search_text {
            return self.clone();
        }
        Self {
            search_text: text,
            current_page: 1,
            ..self.clone()
        }
    }

    pub fn push_search_char(&self, c: char) -> Self {
        let mut text = self.search_text.clone();
        text.push(c);
        self.with_search(text)
    }

    pub fn pop_search_char(&self) -> Self {
        let mut text = self.search_text.clone();
        text.pop();
        self.with_search(text)
    }

    /// Header click: asc -> desc on the same column, otherwise asc on `column`
    pub fn request_sort(&self, column: Column) -> Self {
        let direction = if self.sort.key == Some(column)
            && self.sort.direction == SortDirection::Ascending
        {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self {
            sort: SortConfig::new(column, direction),
            ..self.clone()
        }
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self, total_pages: usize) -> bool {
        self.current_page < total_pages
    }

    pub fn prev_page(&self) -> Self {
        Self {
            current_page: self.current_page.saturating_sub(1).max(1),
            ..self.clone()
        }
    }

    pub fn next_page(&self, total_pages: usize) -> Self {
        Self {
            current_page: (self.current_page + 1).min(total_pages.max(1)),
            ..self.clone()
        }
    }

    pub fn first_page(&self) -> Self {
        Self {
            current_page: 1,
            ..self.clone()
        }
    }

    pub fn last_page(&self, total_pages: usize) -> Self {
        Self {
            current_page: total_pages.max(1),
            ..self.clone()
        }
    }

    /// Bring `current_page` back into `1..=max(1, total_pages)`
    pub fn clamped(&self, total_pages: usize) -> Self {
        Self {
            current_page: self.current_page.clamp(1, total_pages.max(1)),
            ..self.clone()
        }
    }
}
