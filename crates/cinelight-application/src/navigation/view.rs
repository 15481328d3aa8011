//! Data handed to the presentation layer after each dispatch.

use cinelight_core::pagination::{self, Pagination};
use cinelight_core::{AppState, MovieDetail, MovieSummary, NavigationError, Page};

/// Everything needed to render the results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub query: String,
    pub items: Vec<MovieSummary>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub pagination: Pagination,
}

/// Render-ready snapshot of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Search prompt only. Prior results are never shown here.
    Start,
    Results(ResultsView),
    Details(Box<MovieDetail>),
}

impl View {
    /// Builds the view for the state's current page.
    ///
    /// The selected record is only exposed on the details page.
    pub fn from_state(state: &AppState) -> Self {
        match state.page() {
            Page::Start => View::Start,
            Page::Results => View::Results(results_view(state)),
            Page::Details => match state.selected() {
                Some(detail) => View::Details(Box::new(detail.clone())),
                None => View::Results(results_view(state)),
            },
        }
    }

    pub fn page(&self) -> Page {
        match self {
            View::Start => Page::Start,
            View::Results(_) => Page::Results,
            View::Details(_) => Page::Details,
        }
    }
}

fn results_view(state: &AppState) -> ResultsView {
    let total_pages = state.total_pages();
    ResultsView {
        query: state.query().to_string(),
        items: state.results().to_vec(),
        page: state.page_number(),
        total_pages,
        total_results: state.total_results(),
        pagination: pagination::plan(state.page_number(), total_pages),
    }
}

/// Result of dispatching one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The intent succeeded; render the new view.
    Transitioned(View),
    /// The intent failed. State is unchanged and `view` is the current page.
    Rejected { error: NavigationError, view: View },
    /// A newer intent was dispatched while this one waited on the network.
    /// Its response was dropped; there is nothing to render.
    Superseded,
}

impl Outcome {
    pub fn view(&self) -> Option<&View> {
        match self {
            Outcome::Transitioned(view) | Outcome::Rejected { view, .. } => Some(view),
            Outcome::Superseded => None,
        }
    }

    pub fn error(&self) -> Option<&NavigationError> {
        match self {
            Outcome::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Outcome::Superseded)
    }
}
