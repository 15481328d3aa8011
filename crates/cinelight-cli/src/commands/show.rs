use anyhow::{bail, Result};
use cinelight_core::{CatalogClient, DetailError, NavigationError};
use tokio::time::timeout;

use crate::GlobalOpts;
use crate::render;

/// Prints the detail view for one IMDb id.
///
/// There is no result list to select from here, so the client is called
/// directly instead of going through the navigation controller.
pub async fn run(opts: &GlobalOpts, imdb_id: &str, json: bool) -> Result<()> {
    let imdb_id = imdb_id.trim();
    if imdb_id.is_empty() {
        bail!(NavigationError::validation("Please choose a movie to view."));
    }

    let (client, config) = super::connect(opts)?;
    let detail = match timeout(config.timeout, client.fetch_details(imdb_id)).await {
        Ok(result) => result,
        Err(_) => Err(DetailError::transport("detail lookup timed out")),
    };

    match detail {
        Ok(detail) if json => println!("{}", serde_json::to_string_pretty(&detail)?),
        Ok(detail) => render::print_details(&detail),
        Err(e) => {
            tracing::warn!(imdb_id, "Detail lookup failed: {}", e);
            bail!(NavigationError::from(e));
        }
    }
    Ok(())
}
