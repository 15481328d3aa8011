//! Session state for one running client.
//!
//! The state lives for the whole session and is never persisted. It is the sole
//! owner of the current result list and the selected record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{MovieDetail, MovieSummary, total_pages};

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Start,
    Results,
    Details,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Start => write!(f, "start"),
            Page::Results => write!(f, "results"),
            Page::Details => write!(f, "details"),
        }
    }
}

/// Mutable state of a browsing session.
///
/// Setters never fail, but callers are responsible for the cross-field rules:
/// - `results` is only non-empty after a successful search
/// - `selected` is only set while `page` is [`Page::Details`]
/// - `total_results` is the server count for the last executed query, not
///   `results.len()`
///
/// The one rule enforced here is `page_number >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    page: Page,
    query: String,
    results: Vec<MovieSummary>,
    total_results: u32,
    page_number: u32,
    selected: Option<MovieDetail>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            page: Page::Start,
            query: String::new(),
            results: Vec::new(),
            total_results: 0,
            page_number: 1,
            selected: None,
        }
    }
}

impl AppState {
    /// Creates the initial state: start page, no query, no results.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn set_page(&mut self, page: Page) {
        self.page = page;
    }

    /// The last successfully executed query.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    /// Replaces the result list together with the server-reported total.
    pub fn set_results(&mut self, results: Vec<MovieSummary>, total_results: u32) {
        self.results = results;
        self.total_results = total_results;
    }

    pub fn total_results(&self) -> u32 {
        self.total_results
    }

    /// Number of result pages for the last query.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_results)
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Sets the current result page. Zero is stored as 1.
    pub fn set_page_number(&mut self, page_number: u32) {
        self.page_number = page_number.max(1);
    }

    pub fn selected(&self) -> Option<&MovieDetail> {
        self.selected.as_ref()
    }

    pub fn set_selected(&mut self, detail: MovieDetail) {
        self.selected = Some(detail);
    }

    pub fn clear_selected(&mut self) {
        self.selected = None;
    }

    /// Looks up a result on the current page by IMDb id.
    pub fn find_result(&self, imdb_id: &str) -> Option<&MovieSummary> {
        self.results.iter().find(|item| item.imdb_id == imdb_id)
    }
}
