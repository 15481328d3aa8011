pub mod repl;
pub mod search;
pub mod show;

use std::sync::Arc;

use anyhow::{Context, Result};
use cinelight_application::NavigationController;
use cinelight_interaction::{ConfigOverrides, OmdbApiClient, OmdbConfig};

use crate::GlobalOpts;

/// Resolves the configuration and builds the OMDb client.
pub fn connect(opts: &GlobalOpts) -> Result<(OmdbApiClient, OmdbConfig)> {
    let config = OmdbConfig::resolve(ConfigOverrides {
        api_key: opts.api_key.clone(),
        base_url: opts.base_url.clone(),
        timeout_secs: opts.timeout_secs,
    })?;
    tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "Resolved OMDb configuration");

    let client = OmdbApiClient::new(&config).context("Failed to build HTTP client")?;
    Ok((client, config))
}

/// Builds a navigation controller backed by the OMDb client.
pub fn controller(opts: &GlobalOpts) -> Result<NavigationController> {
    let (client, config) = connect(opts)?;
    Ok(NavigationController::new(Arc::new(client)).with_request_timeout(config.timeout))
}
