use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cinelight_application::{Intent, NavigationController, Outcome, View};
use cinelight_core::catalog::{MediaType, MovieDetail, MovieSummary, SearchPage};
use cinelight_core::{CatalogClient, DetailError, NavigationError, Page, PageControl, SearchError};
use tokio::sync::oneshot;

/// How the mock answers one call.
enum Reply<T, E> {
    Ready(Result<T, E>),
    /// Resolves when the test sends on the paired channel.
    Gated(oneshot::Receiver<Result<T, E>>),
    /// Never resolves.
    Never,
}

impl<T, E> Reply<T, E> {
    async fn resolve(self) -> Result<T, E> {
        match self {
            Reply::Ready(result) => result,
            Reply::Gated(rx) => rx.await.expect("gate dropped"),
            Reply::Never => std::future::pending().await,
        }
    }
}

/// Catalog client that replays scripted replies in call order.
#[derive(Default)]
struct MockCatalog {
    search_replies: Mutex<VecDeque<Reply<SearchPage, SearchError>>>,
    detail_replies: Mutex<VecDeque<Reply<MovieDetail, DetailError>>>,
    search_calls: Mutex<Vec<(String, u32)>>,
    detail_calls: Mutex<Vec<String>>,
}

impl MockCatalog {
    fn push_search(&self, reply: Reply<SearchPage, SearchError>) {
        self.search_replies.lock().unwrap().push_back(reply);
    }

    fn push_detail(&self, reply: Reply<MovieDetail, DetailError>) {
        self.detail_replies.lock().unwrap().push_back(reply);
    }

    fn search_calls(&self) -> Vec<(String, u32)> {
        self.search_calls.lock().unwrap().clone()
    }

    fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogClient for MockCatalog {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, SearchError> {
        self.search_calls.lock().unwrap().push((query.to_string(), page));
        let reply = self
            .search_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected search call");
        reply.resolve().await
    }

    async fn fetch_details(&self, imdb_id: &str) -> Result<MovieDetail, DetailError> {
        self.detail_calls.lock().unwrap().push(imdb_id.to_string());
        let reply = self
            .detail_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected detail call");
        reply.resolve().await
    }
}

fn summary(title: &str, id: &str) -> MovieSummary {
    MovieSummary {
        title: title.to_string(),
        year: "2005".to_string(),
        imdb_id: id.to_string(),
        media_type: MediaType::Movie,
        poster_url: None,
    }
}

fn results(prefix: &str, count: usize, total_results: u32) -> SearchPage {
    SearchPage {
        items: (0..count)
            .map(|i| summary(&format!("{} {}", prefix, i), &format!("tt{:07}", i)))
            .collect(),
        total_results,
    }
}

fn detail(id: &str, title: &str) -> MovieDetail {
    MovieDetail {
        title: title.to_string(),
        year: "1994".to_string(),
        rated: "R".to_string(),
        released: "14 Oct 1994".to_string(),
        runtime: "154 min".to_string(),
        genre: "Crime, Drama".to_string(),
        director: "Quentin Tarantino".to_string(),
        writer: "Quentin Tarantino".to_string(),
        actors: "John Travolta".to_string(),
        plot: "Two hitmen.".to_string(),
        language: "English".to_string(),
        country: "United States".to_string(),
        awards: "Won 1 Oscar".to_string(),
        poster_url: None,
        ratings: Vec::new(),
        metascore: None,
        imdb_rating: "8.9".to_string(),
        imdb_votes: "2,000,000".to_string(),
        imdb_id: id.to_string(),
        media_type: MediaType::Movie,
        dvd: None,
        box_office: None,
        production: None,
        website: None,
    }
}

fn setup() -> (Arc<MockCatalog>, Arc<NavigationController>) {
    let mock = Arc::new(MockCatalog::default());
    let controller = Arc::new(NavigationController::new(mock.clone()));
    (mock, controller)
}

/// Searches "batman" and asserts we land on the results page.
async fn reach_results(mock: &MockCatalog, controller: &NavigationController, total: u32) {
    mock.push_search(Reply::Ready(Ok(results("Batman", 10, total))));
    let outcome = controller.dispatch(Intent::search("batman")).await;
    assert!(matches!(outcome, Outcome::Transitioned(View::Results(_))), "{:?}", outcome);
}

async fn wait_for_search_calls(mock: &MockCatalog, count: usize) {
    while mock.search_calls().len() < count {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_initial_state_is_start() {
    let (_mock, controller) = setup();
    assert_eq!(controller.view().await, View::Start);
    assert_eq!(controller.state().await.page(), Page::Start);
}

#[tokio::test]
async fn test_search_success_shows_results_with_pagination() {
    let (mock, controller) = setup();
    mock.push_search(Reply::Ready(Ok(results("Batman", 10, 23))));

    let outcome = controller.dispatch(Intent::search("  batman ")).await;

    let Outcome::Transitioned(View::Results(view)) = outcome else {
        panic!("expected results, got {:?}", outcome);
    };
    assert_eq!(view.query, "batman");
    assert_eq!(view.page, 1);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.total_results, 23);
    assert_eq!(view.items.len(), 10);
    assert_eq!(
        view.pagination.controls(),
        vec![
            PageControl::Prev { target: None },
            PageControl::Page { number: 1, active: true },
            PageControl::Page { number: 2, active: false },
            PageControl::Page { number: 3, active: false },
            PageControl::Next { target: Some(2) },
        ]
    );
    assert_eq!(mock.search_calls(), vec![("batman".to_string(), 1)]);

    let state = controller.state().await;
    assert_eq!(state.page(), Page::Results);
    assert_eq!(state.page_number(), 1);
    assert_eq!(state.total_results(), 23);
}

#[tokio::test]
async fn test_empty_query_is_rejected_without_remote_call() {
    let (mock, controller) = setup();

    for query in ["", "   "] {
        let outcome = controller.dispatch(Intent::search(query)).await;
        let Outcome::Rejected { error, view } = outcome else {
            panic!("expected rejection");
        };
        assert!(error.is_validation());
        assert_eq!(error.to_string(), "Please enter a movie title to search.");
        assert_eq!(view, View::Start);
    }

    assert!(mock.search_calls().is_empty());
    assert_eq!(controller.state().await.page(), Page::Start);
}

#[tokio::test]
async fn test_search_not_found_keeps_state() {
    let (mock, controller) = setup();
    mock.push_search(Reply::Ready(Err(SearchError::not_found(Some(
        "Movie not found!".to_string(),
    )))));

    let outcome = controller.dispatch(Intent::search("qwertyuiop")).await;

    let error = outcome.error().expect("expected error");
    assert!(error.is_not_found());
    assert_eq!(error.to_string(), "Movie not found!");
    assert_eq!(outcome.view(), Some(&View::Start));
    assert_eq!(controller.state().await.query(), "");
}

#[tokio::test]
async fn test_search_transport_error_surfaces_retry_message() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 23).await;
    let before = controller.state().await;

    mock.push_search(Reply::Ready(Err(SearchError::transport("connection reset"))));
    let outcome = controller.dispatch(Intent::search("superman")).await;

    let error = outcome.error().expect("expected error");
    assert!(error.is_transport());
    assert_eq!(
        error.to_string(),
        "An error occurred while searching. Please try again."
    );
    assert_eq!(controller.state().await, before);
}

#[tokio::test]
async fn test_change_page_requests_stored_query() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 95).await;

    mock.push_search(Reply::Ready(Ok(results("Batman p7", 10, 95))));
    let outcome = controller.dispatch(Intent::ChangePage(7)).await;

    let Outcome::Transitioned(View::Results(view)) = outcome else {
        panic!("expected results");
    };
    assert_eq!(view.page, 7);
    assert_eq!(view.items[0].title, "Batman p7 0");
    assert_eq!(
        view.pagination.window(),
        &[
            PageControl::Page { number: 1, active: false },
            PageControl::Ellipsis,
            PageControl::Page { number: 6, active: false },
            PageControl::Page { number: 7, active: true },
            PageControl::Page { number: 8, active: false },
            PageControl::Ellipsis,
            PageControl::Page { number: 10, active: false },
        ]
    );
    assert_eq!(mock.search_calls()[1], ("batman".to_string(), 7));
}

#[tokio::test]
async fn test_change_page_only_from_results() {
    let (mock, controller) = setup();

    let outcome = controller.dispatch(Intent::ChangePage(2)).await;
    assert!(matches!(
        outcome.error(),
        Some(NavigationError::InvalidIntent { intent: "ChangePage", page: Page::Start })
    ));

    reach_results(&mock, &controller, 30).await;
    mock.push_detail(Reply::Ready(Ok(detail("tt0000001", "Batman"))));
    controller.dispatch(Intent::select("tt0000001")).await;
    assert_eq!(controller.state().await.page(), Page::Details);

    let outcome = controller.dispatch(Intent::ChangePage(2)).await;
    assert!(matches!(
        outcome.error(),
        Some(NavigationError::InvalidIntent { page: Page::Details, .. })
    ));
    assert_eq!(mock.search_calls().len(), 1);
}

#[tokio::test]
async fn test_change_page_out_of_range() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 23).await;

    for page in [0, 4] {
        let outcome = controller.dispatch(Intent::ChangePage(page)).await;
        assert!(outcome.error().is_some_and(|e| e.is_validation()));
    }
    assert_eq!(mock.search_calls().len(), 1);
}

#[tokio::test]
async fn test_select_item_success_shows_details() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 23).await;
    mock.push_detail(Reply::Ready(Ok(detail("tt0110912", "Pulp Fiction"))));

    let outcome = controller.dispatch(Intent::select("tt0110912")).await;

    let Outcome::Transitioned(View::Details(shown)) = outcome else {
        panic!("expected details");
    };
    assert_eq!(shown.title, "Pulp Fiction");

    let state = controller.state().await;
    assert_eq!(state.page(), Page::Details);
    assert_eq!(state.selected().map(|d| d.imdb_id.as_str()), Some("tt0110912"));
    assert_eq!(mock.detail_calls(), vec!["tt0110912".to_string()]);
}

#[tokio::test]
async fn test_select_item_failure_keeps_results() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 23).await;
    mock.push_detail(Reply::Ready(Err(DetailError::not_found(Some(
        "Incorrect IMDb ID.".to_string(),
    )))));

    let outcome = controller.dispatch(Intent::select("tt0110912")).await;

    assert_eq!(
        outcome.error().map(|e| e.to_string()),
        Some("Incorrect IMDb ID.".to_string())
    );
    assert!(matches!(outcome.view(), Some(View::Results(_))));
    let state = controller.state().await;
    assert_eq!(state.page(), Page::Results);
    assert!(state.selected().is_none());
}

#[tokio::test]
async fn test_select_item_failure_without_message() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 23).await;
    mock.push_detail(Reply::Ready(Err(DetailError::not_found(None))));

    let outcome = controller.dispatch(Intent::select("tt0110912")).await;
    assert_eq!(
        outcome.error().map(|e| e.to_string()),
        Some("Failed to load movie details.".to_string())
    );
}

#[tokio::test]
async fn test_back_returns_to_results_without_detail() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 23).await;
    mock.push_detail(Reply::Ready(Ok(detail("tt0000003", "Batman 3"))));
    controller.dispatch(Intent::select("tt0000003")).await;

    let outcome = controller.dispatch(Intent::Back).await;

    let Outcome::Transitioned(View::Results(view)) = outcome else {
        panic!("expected results");
    };
    assert_eq!(view.query, "batman");
    assert!(controller.state().await.selected().is_none());

    let outcome = controller.dispatch(Intent::Back).await;
    assert!(matches!(
        outcome.error(),
        Some(NavigationError::InvalidIntent { intent: "Back", page: Page::Results })
    ));
}

#[tokio::test]
async fn test_go_home_keeps_query_and_results() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 23).await;

    let outcome = controller.dispatch(Intent::GoHome).await;
    assert_eq!(outcome, Outcome::Transitioned(View::Start));

    let state = controller.state().await;
    assert_eq!(state.page(), Page::Start);
    assert_eq!(state.query(), "batman");
    assert_eq!(state.results().len(), 10);

    // ChangePage needs the results page even though results are still held.
    let outcome = controller.dispatch(Intent::ChangePage(2)).await;
    assert!(outcome.error().is_some());
}

#[tokio::test]
async fn test_search_from_details_is_rejected() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 23).await;
    mock.push_detail(Reply::Ready(Ok(detail("tt0000001", "Batman"))));
    controller.dispatch(Intent::select("tt0000001")).await;

    let outcome = controller.dispatch(Intent::search("superman")).await;
    assert!(matches!(
        outcome.error(),
        Some(NavigationError::InvalidIntent { intent: "Search", page: Page::Details })
    ));
    assert!(matches!(outcome.view(), Some(View::Details(_))));
}

#[tokio::test]
async fn test_stale_search_does_not_overwrite_newer_one() {
    let (mock, controller) = setup();
    let (tx_a, rx_a) = oneshot::channel();
    let (tx_b, rx_b) = oneshot::channel();
    mock.push_search(Reply::Gated(rx_a));
    mock.push_search(Reply::Gated(rx_b));

    let task_a = tokio::spawn({
        let controller = controller.clone();
        async move { controller.dispatch(Intent::search("batman")).await }
    });
    wait_for_search_calls(&mock, 1).await;

    let task_b = tokio::spawn({
        let controller = controller.clone();
        async move { controller.dispatch(Intent::search("superman")).await }
    });
    wait_for_search_calls(&mock, 2).await;

    tx_b.send(Ok(results("Superman", 3, 3))).unwrap();
    let outcome_b = task_b.await.unwrap();
    assert!(matches!(outcome_b, Outcome::Transitioned(View::Results(_))));

    tx_a.send(Ok(results("Batman", 10, 23))).unwrap();
    let outcome_a = task_a.await.unwrap();
    assert!(outcome_a.is_superseded());

    let state = controller.state().await;
    assert_eq!(state.query(), "superman");
    assert_eq!(state.total_results(), 3);
    assert_eq!(state.results()[0].title, "Superman 0");
}

#[tokio::test]
async fn test_stale_error_is_not_surfaced() {
    let (mock, controller) = setup();
    let (tx_a, rx_a) = oneshot::channel();
    mock.push_search(Reply::Gated(rx_a));
    mock.push_search(Reply::Ready(Ok(results("Alien", 5, 5))));

    let task_a = tokio::spawn({
        let controller = controller.clone();
        async move { controller.dispatch(Intent::search("aliens")).await }
    });
    wait_for_search_calls(&mock, 1).await;

    let outcome_b = controller.dispatch(Intent::search("alien")).await;
    assert!(matches!(outcome_b, Outcome::Transitioned(_)));

    tx_a.send(Err(SearchError::transport("connection reset"))).unwrap();
    assert!(task_a.await.unwrap().is_superseded());
    assert_eq!(controller.state().await.query(), "alien");
}

#[tokio::test]
async fn test_stale_page_change_is_dropped() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 95).await;

    let (tx_slow, rx_slow) = oneshot::channel();
    mock.push_search(Reply::Gated(rx_slow));
    mock.push_search(Reply::Ready(Ok(results("Batman p3", 10, 95))));

    let slow = tokio::spawn({
        let controller = controller.clone();
        async move { controller.dispatch(Intent::ChangePage(2)).await }
    });
    wait_for_search_calls(&mock, 2).await;

    let fast = controller.dispatch(Intent::ChangePage(3)).await;
    assert!(matches!(fast, Outcome::Transitioned(_)));

    tx_slow.send(Ok(results("Batman p2", 10, 95))).unwrap();
    assert!(slow.await.unwrap().is_superseded());

    let state = controller.state().await;
    assert_eq!(state.page_number(), 3);
    assert_eq!(state.results()[0].title, "Batman p3 0");
}

#[tokio::test]
async fn test_go_home_supersedes_pending_search() {
    let (mock, controller) = setup();
    let (tx, rx) = oneshot::channel();
    mock.push_search(Reply::Gated(rx));

    let pending = tokio::spawn({
        let controller = controller.clone();
        async move { controller.dispatch(Intent::search("batman")).await }
    });
    wait_for_search_calls(&mock, 1).await;

    controller.dispatch(Intent::GoHome).await;
    tx.send(Ok(results("Batman", 10, 23))).unwrap();

    assert!(pending.await.unwrap().is_superseded());
    let state = controller.state().await;
    assert_eq!(state.page(), Page::Start);
    assert!(state.results().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_search_timeout_is_transport_error() {
    let mock = Arc::new(MockCatalog::default());
    let controller =
        NavigationController::new(mock.clone()).with_request_timeout(Duration::from_secs(5));
    mock.push_search(Reply::Never);

    let outcome = controller.dispatch(Intent::search("batman")).await;

    let error = outcome.error().expect("expected timeout error");
    assert!(error.is_transport());
    assert_eq!(controller.state().await.page(), Page::Start);
}

#[tokio::test(start_paused = true)]
async fn test_detail_timeout_is_transport_error() {
    let mock = Arc::new(MockCatalog::default());
    let controller =
        NavigationController::new(mock.clone()).with_request_timeout(Duration::from_secs(5));
    reach_results(&mock, &controller, 23).await;
    mock.push_detail(Reply::Never);

    let outcome = controller.dispatch(Intent::select("tt0000001")).await;

    assert_eq!(
        outcome.error().map(|e| e.to_string()),
        Some("An error occurred while loading movie details. Please try again.".to_string())
    );
    assert_eq!(controller.state().await.page(), Page::Results);
}

async fn wait_for_detail_calls(mock: &MockCatalog, count: usize) {
    while mock.detail_calls().len() < count {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_stale_detail_does_not_overwrite_newer_one() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 23).await;

    let (tx_first, rx_first) = oneshot::channel();
    mock.push_detail(Reply::Gated(rx_first));
    mock.push_detail(Reply::Ready(Ok(detail("tt0000002", "Batman 2"))));

    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.dispatch(Intent::select("tt0000001")).await }
    });
    wait_for_detail_calls(&mock, 1).await;

    let second = controller.dispatch(Intent::select("tt0000002")).await;
    assert!(matches!(second, Outcome::Transitioned(View::Details(_))));

    tx_first.send(Ok(detail("tt0000001", "Batman 1"))).unwrap();
    assert!(first.await.unwrap().is_superseded());

    let state = controller.state().await;
    assert_eq!(state.page(), Page::Details);
    assert_eq!(state.selected().map(|d| d.imdb_id.as_str()), Some("tt0000002"));
}

#[tokio::test]
async fn test_rejection_view_matches_unchanged_state() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 95).await;
    mock.push_search(Reply::Ready(Err(SearchError::transport("connection reset"))));

    let outcome = controller.dispatch(Intent::ChangePage(5)).await;

    let Outcome::Rejected { error, view } = outcome else {
        panic!("expected rejection");
    };
    assert!(error.is_transport());
    assert_eq!(view, controller.view().await);
    let View::Results(results) = view else {
        panic!("expected results view");
    };
    assert_eq!(results.page, 1);
    assert_eq!(results.query, "batman");
}

#[tokio::test]
async fn test_repeated_next_page_steps_from_page_in_flight() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 95).await;

    let (tx_slow, rx_slow) = oneshot::channel();
    mock.push_search(Reply::Gated(rx_slow));
    mock.push_search(Reply::Ready(Ok(results("Batman p3", 10, 95))));

    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.dispatch(Intent::NextPage).await }
    });
    wait_for_search_calls(&mock, 2).await;

    let second = controller.dispatch(Intent::NextPage).await;
    assert!(matches!(second, Outcome::Transitioned(_)));

    tx_slow.send(Ok(results("Batman p2", 10, 95))).unwrap();
    assert!(first.await.unwrap().is_superseded());

    let calls = mock.search_calls();
    assert_eq!(calls[1], ("batman".to_string(), 2));
    assert_eq!(calls[2], ("batman".to_string(), 3));
    assert_eq!(controller.state().await.page_number(), 3);
}

#[tokio::test]
async fn test_page_steps_stop_at_the_edges() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 23).await;

    let outcome = controller.dispatch(Intent::PrevPage).await;
    assert_eq!(
        outcome.error().map(|e| e.to_string()),
        Some("Already on the first page.".to_string())
    );

    mock.push_search(Reply::Ready(Ok(results("Batman p3", 3, 23))));
    controller.dispatch(Intent::ChangePage(3)).await;
    let outcome = controller.dispatch(Intent::NextPage).await;
    assert_eq!(
        outcome.error().map(|e| e.to_string()),
        Some("Already on the last page.".to_string())
    );
    assert_eq!(mock.search_calls().len(), 2);
}

#[tokio::test]
async fn test_failed_page_step_does_not_move_base() {
    let (mock, controller) = setup();
    reach_results(&mock, &controller, 95).await;
    mock.push_search(Reply::Ready(Err(SearchError::transport("connection reset"))));
    mock.push_search(Reply::Ready(Ok(results("Batman p2", 10, 95))));

    let outcome = controller.dispatch(Intent::NextPage).await;
    assert!(outcome.error().is_some_and(|e| e.is_transport()));

    controller.dispatch(Intent::NextPage).await;
    let calls = mock.search_calls();
    assert_eq!(calls[1].1, 2);
    assert_eq!(calls[2].1, 2);
    assert_eq!(controller.state().await.page_number(), 2);
}

#[tokio::test]
async fn test_page_steps_only_from_results() {
    let (_mock, controller) = setup();
    let outcome = controller.dispatch(Intent::NextPage).await;
    assert!(matches!(
        outcome.error(),
        Some(NavigationError::InvalidIntent { intent: "NextPage", page: Page::Start })
    ));
}
