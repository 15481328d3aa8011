pub mod app_state;
pub mod catalog;
pub mod error;
pub mod pagination;

// Re-export common types
pub use app_state::{AppState, Page};
pub use catalog::{CatalogClient, MovieDetail, MovieSummary, SearchPage};
pub use error::{DetailError, NavigationError, RemoteOperation, SearchError};
pub use pagination::{PageControl, Pagination};
