//! Action enum - All possible application actions
//!
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::Column;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick when no input arrived
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    /// Scroll the help dialog by one line
    ScrollHelpUp,
    ScrollHelpDown,
    /// Close the top modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    ExitSearchMode,
    /// Append a character to the search text
    SearchInput(char),
    /// Remove the last character of the search text
    SearchBackspace,
    ClearSearch,

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting
    // ─────────────────────────────────────────────────────────────────────────
    /// Column header was activated
    SortBy(Column),

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────
    PrevPage,
    NextPage,
    FirstPage,
    LastPage,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::ScrollHelpUp => write!(f, "ScrollHelpUp"),
            Action::ScrollHelpDown => write!(f, "ScrollHelpDown"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::ClearSearch => write!(f, "ClearSearch"),
            Action::SortBy(column) => write!(f, "SortBy({})", column),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::NextPage => write!(f, "NextPage"),
            Action::FirstPage => write!(f, "FirstPage"),
            Action::LastPage => write!(f, "LastPage"),
        }
    }
}
