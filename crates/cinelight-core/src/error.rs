//! Error types for the Cinelight client.
//!
//! Remote failures are split per operation (`SearchError`, `DetailError`) so the
//! catalog seam stays explicit about what went wrong. The navigation layer folds
//! both into `NavigationError`, whose `Display` output is the message shown to
//! the user.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_state::Page;

/// Fallback message when the service rejects a search without explaining why.
pub const NO_RESULTS_MESSAGE: &str = "No movies found. Please try a different search term.";

/// Fallback message when the service rejects a detail lookup without explaining why.
pub const DETAIL_UNAVAILABLE_MESSAGE: &str = "Failed to load movie details.";

/// Message shown for a blank search query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a movie title to search.";

/// Failure of a title search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The service answered but reported no matches (or another logical failure).
    #[error("{0}")]
    NotFound(String),

    /// Network failure, timeout, unexpected status or malformed body.
    #[error("search transport failure: {0}")]
    Transport(String),
}

impl SearchError {
    /// Creates a NotFound error, falling back to the generic message when the
    /// service supplied none.
    pub fn not_found(message: Option<String>) -> Self {
        Self::NotFound(non_blank(message).unwrap_or_else(|| NO_RESULTS_MESSAGE.to_string()))
    }

    /// Creates a Transport error
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport(detail.into())
    }
}

/// Failure of a detail lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetailError {
    #[error("{0}")]
    NotFound(String),

    #[error("detail transport failure: {0}")]
    Transport(String),
}

impl DetailError {
    pub fn not_found(message: Option<String>) -> Self {
        Self::NotFound(
            non_blank(message).unwrap_or_else(|| DETAIL_UNAVAILABLE_MESSAGE.to_string()),
        )
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport(detail.into())
    }
}

/// The remote operation a transport failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteOperation {
    Search,
    Details,
}

impl RemoteOperation {
    /// Generic retry message shown instead of the raw transport detail.
    pub fn retry_message(self) -> &'static str {
        match self {
            Self::Search => "An error occurred while searching. Please try again.",
            Self::Details => "An error occurred while loading movie details. Please try again.",
        }
    }
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search => write!(f, "search"),
            Self::Details => write!(f, "details"),
        }
    }
}

/// Errors surfaced by the navigation controller.
///
/// None of these is fatal: the controller stays on its current page and the
/// same intent can simply be dispatched again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Rejected locally before any remote call.
    #[error("{0}")]
    Validation(String),

    /// The service reported no results or no record.
    #[error("{0}")]
    NotFound(String),

    /// Network or parse failure; the user only sees the generic retry text.
    #[error("{}", .operation.retry_message())]
    Transport {
        operation: RemoteOperation,
        detail: String,
    },

    /// The intent has no meaning on the current page.
    #[error("{intent} is not available on the {page} page.")]
    InvalidIntent { intent: &'static str, page: Page },
}

impl NavigationError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this error was raised before any remote call
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl From<SearchError> for NavigationError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::NotFound(message) => Self::NotFound(message),
            SearchError::Transport(detail) => Self::Transport {
                operation: RemoteOperation::Search,
                detail,
            },
        }
    }
}

impl From<DetailError> for NavigationError {
    fn from(err: DetailError) -> Self {
        match err {
            DetailError::NotFound(message) => Self::NotFound(message),
            DetailError::Transport(detail) => Self::Transport {
                operation: RemoteOperation::Details,
                detail,
            },
        }
    }
}

fn non_blank(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}
