//! Catalog client trait definition.

use async_trait::async_trait;

use crate::catalog::{MovieDetail, SearchPage};
use crate::error::{DetailError, SearchError};

/// Remote movie catalog.
///
/// Implementations perform network I/O only; they never touch session state.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Searches titles matching `query` and returns the requested result page.
    ///
    /// # Arguments
    /// * `query` - Non-empty title fragment
    /// * `page` - 1-based page number
    ///
    /// # Errors
    /// `SearchError::NotFound` when the service reports a logical failure,
    /// `SearchError::Transport` for anything that prevented a usable answer.
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, SearchError>;

    /// Fetches the full record for one title.
    async fn fetch_details(&self, imdb_id: &str) -> Result<MovieDetail, DetailError>;
}
