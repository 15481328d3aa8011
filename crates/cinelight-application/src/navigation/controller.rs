//! The navigation state machine.
//!
//! ```text
//!            Search                SelectItem
//!   Start ──────────► Results ─────────────► Details
//!     ▲                │  ▲ ChangePage, Next/  │
//!     │                │  │ PrevPage,          │
//!     │     GoHome     │  │ Search      Back   │
//!     └────────────────┘  └────────────────────┘
//!     (GoHome is valid from every page)
//! ```

use std::sync::Arc;
use std::time::Duration;

use cinelight_core::error::EMPTY_QUERY_MESSAGE;
use cinelight_core::{
    AppState, CatalogClient, DetailError, MovieDetail, NavigationError, Page, SearchError,
    SearchPage,
};
use tokio::sync::Mutex;

use super::intent::Intent;
use super::sequence::{RequestSequencer, RequestTicket};
use super::view::{Outcome, View};

/// Upper bound on a single remote call before it counts as a transport failure.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Session state plus the ticket issuer that guards it.
#[derive(Debug, Default)]
struct Session {
    state: AppState,
    requests: RequestSequencer,
    /// Result page requested by the latest ticket, while that request is in flight.
    loading_page: Option<(RequestTicket, u32)>,
}

impl Session {
    /// Page that relative paging steps from: the one still loading if the
    /// latest request is a page load, else the one on screen.
    fn paging_base(&self) -> u32 {
        match self.loading_page {
            Some((ticket, page)) if self.requests.is_current(ticket) => page,
            _ => self.state.page_number(),
        }
    }
}

/// What happened to an intent that did not fail.
enum Applied {
    Transitioned(View),
    Superseded,
}

/// A failed intent together with the view current when it failed.
struct Rejection {
    error: NavigationError,
    view: View,
}

impl Rejection {
    fn new(state: &AppState, error: impl Into<NavigationError>) -> Self {
        Self {
            error: error.into(),
            view: View::from_state(state),
        }
    }
}

/// Owns the session state and applies intents to it.
///
/// The controller is shared by reference, so several intents may be in flight
/// at once. The state lock is never held across a remote call; when a response
/// arrives, it is applied only if no newer intent has been dispatched since.
pub struct NavigationController {
    client: Arc<dyn CatalogClient>,
    session: Mutex<Session>,
    request_timeout: Duration,
}

impl NavigationController {
    /// Creates a controller on the start page.
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            client,
            session: Mutex::new(Session::default()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Current view, for the initial render or a redraw.
    pub async fn view(&self) -> View {
        View::from_state(&self.session.lock().await.state)
    }

    /// Copy of the session state.
    pub async fn state(&self) -> AppState {
        self.session.lock().await.state.clone()
    }

    /// Applies one intent and reports what the presentation layer should do.
    ///
    /// Errors never escape: they come back as [`Outcome::Rejected`] with the
    /// state left exactly as it was.
    pub async fn dispatch(&self, intent: Intent) -> Outcome {
        let name = intent.name();
        let result = match intent {
            Intent::Search { query, page } => self.search(query, page).await,
            Intent::ChangePage(page) => self.change_page(page).await,
            Intent::NextPage => self.step_page(1).await,
            Intent::PrevPage => self.step_page(-1).await,
            Intent::SelectItem(imdb_id) => self.select_item(imdb_id).await,
            Intent::Back => self.back().await,
            Intent::GoHome => self.go_home().await,
        };

        match result {
            Ok(Applied::Transitioned(view)) => {
                tracing::info!(intent = name, page = %view.page(), "Navigation transition");
                Outcome::Transitioned(view)
            }
            Ok(Applied::Superseded) => {
                tracing::debug!(intent = name, "Dropped response of superseded intent");
                Outcome::Superseded
            }
            Err(Rejection { error, view }) => {
                match &error {
                    NavigationError::Transport { operation, detail } => {
                        tracing::warn!(intent = name, %operation, "Remote call failed: {}", detail)
                    }
                    other => tracing::info!(intent = name, "Intent rejected: {}", other),
                }
                Outcome::Rejected { error, view }
            }
        }
    }

    async fn search(&self, query: String, page: u32) -> Result<Applied, Rejection> {
        let query = query.trim().to_string();
        let page = page.max(1);
        let ticket = {
            let mut session = self.session.lock().await;
            ensure_page(&session.state, "Search", &[Page::Start, Page::Results])?;
            if query.is_empty() {
                return Err(Rejection::new(
                    &session.state,
                    NavigationError::validation(EMPTY_QUERY_MESSAGE),
                ));
            }
            issue_page_load(&mut session, page)
        };

        self.load_results(ticket, query, page).await
    }

    async fn change_page(&self, page: u32) -> Result<Applied, Rejection> {
        let (ticket, query) = {
            let mut session = self.session.lock().await;
            ensure_page(&session.state, "ChangePage", &[Page::Results])?;

            let total_pages = session.state.total_pages();
            if page == 0 || page > total_pages {
                return Err(Rejection::new(
                    &session.state,
                    NavigationError::validation(format!(
                        "Page {} is out of range (1-{}).",
                        page, total_pages
                    )),
                ));
            }
            let ticket = issue_page_load(&mut session, page);
            (ticket, session.state.query().to_string())
        };

        self.load_results(ticket, query, page).await
    }

    /// Moves one page forward or back from the page on screen, or from the
    /// page still loading so that repeated steps accumulate.
    async fn step_page(&self, step: i64) -> Result<Applied, Rejection> {
        let intent = if step > 0 { "NextPage" } else { "PrevPage" };
        let (ticket, query, page) = {
            let mut session = self.session.lock().await;
            ensure_page(&session.state, intent, &[Page::Results])?;

            let target = i64::from(session.paging_base()) + step;
            let total_pages = i64::from(session.state.total_pages());
            if target < 1 {
                return Err(Rejection::new(
                    &session.state,
                    NavigationError::validation("Already on the first page."),
                ));
            }
            if target > total_pages {
                return Err(Rejection::new(
                    &session.state,
                    NavigationError::validation("Already on the last page."),
                ));
            }
            // 1 <= target <= total_pages, which is a u32.
            let page = target as u32;
            let ticket = issue_page_load(&mut session, page);
            (ticket, session.state.query().to_string(), page)
        };

        self.load_results(ticket, query, page).await
    }

    async fn load_results(
        &self,
        ticket: RequestTicket,
        query: String,
        page: u32,
    ) -> Result<Applied, Rejection> {
        let response = self.remote_search(&query, page).await;

        let mut session = self.session.lock().await;
        if !session.requests.is_current(ticket) {
            return Ok(Applied::Superseded);
        }
        session.loading_page = None;
        let SearchPage {
            items,
            total_results,
        } = response.map_err(|e| Rejection::new(&session.state, e))?;

        let state = &mut session.state;
        state.set_query(query);
        state.set_results(items, total_results);
        state.set_page_number(page);
        state.clear_selected();
        state.set_page(Page::Results);
        Ok(Applied::Transitioned(View::from_state(&session.state)))
    }

    async fn select_item(&self, imdb_id: String) -> Result<Applied, Rejection> {
        let imdb_id = imdb_id.trim().to_string();
        let ticket = {
            let mut session = self.session.lock().await;
            ensure_page(&session.state, "SelectItem", &[Page::Results])?;
            if imdb_id.is_empty() {
                return Err(Rejection::new(
                    &session.state,
                    NavigationError::validation("Please choose a movie to view."),
                ));
            }
            session.requests.issue()
        };

        let response = self.remote_details(&imdb_id).await;

        let mut session = self.session.lock().await;
        if !session.requests.is_current(ticket) {
            return Ok(Applied::Superseded);
        }
        let detail = response.map_err(|e| Rejection::new(&session.state, e))?;

        session.state.set_selected(detail);
        session.state.set_page(Page::Details);
        Ok(Applied::Transitioned(View::from_state(&session.state)))
    }

    async fn back(&self) -> Result<Applied, Rejection> {
        let mut session = self.session.lock().await;
        ensure_page(&session.state, "Back", &[Page::Details])?;
        session.requests.issue();
        session.state.clear_selected();
        session.state.set_page(Page::Results);
        Ok(Applied::Transitioned(View::from_state(&session.state)))
    }

    async fn go_home(&self) -> Result<Applied, Rejection> {
        let mut session = self.session.lock().await;
        session.requests.issue();
        session.state.clear_selected();
        session.state.set_page(Page::Start);
        Ok(Applied::Transitioned(View::Start))
    }

    async fn remote_search(&self, query: &str, page: u32) -> Result<SearchPage, SearchError> {
        match tokio::time::timeout(self.request_timeout, self.client.search(query, page)).await {
            Ok(result) => result,
            Err(_) => Err(SearchError::transport(format!(
                "search timed out after {:?}",
                self.request_timeout
            ))),
        }
    }

    async fn remote_details(&self, imdb_id: &str) -> Result<MovieDetail, DetailError> {
        match tokio::time::timeout(self.request_timeout, self.client.fetch_details(imdb_id)).await
        {
            Ok(result) => result,
            Err(_) => Err(DetailError::transport(format!(
                "detail lookup timed out after {:?}",
                self.request_timeout
            ))),
        }
    }
}

fn issue_page_load(session: &mut Session, page: u32) -> RequestTicket {
    let ticket = session.requests.issue();
    session.loading_page = Some((ticket, page));
    ticket
}

fn ensure_page(state: &AppState, intent: &'static str, allowed: &[Page]) -> Result<(), Rejection> {
    if allowed.contains(&state.page()) {
        Ok(())
    } else {
        Err(Rejection::new(
            state,
            NavigationError::InvalidIntent {
                intent,
                page: state.page(),
            },
        ))
    }
}
