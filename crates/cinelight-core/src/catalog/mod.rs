//! Movie catalog: domain models and the client seam to the remote service.

pub mod client;
pub mod model;

pub use client::CatalogClient;
pub use model::{
    MediaType, MovieDetail, MovieSummary, PAGE_SIZE, Rating, SearchPage, total_pages,
};
