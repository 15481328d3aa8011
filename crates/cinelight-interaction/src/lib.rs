//! Remote service integrations for Cinelight.

pub mod config;
pub mod omdb_api_client;

pub use config::{ConfigError, ConfigOverrides, OmdbConfig};
pub use omdb_api_client::OmdbApiClient;
