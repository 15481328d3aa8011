use anyhow::{bail, Result};
use cinelight_application::{Intent, Outcome, View};
use serde_json::json;

use crate::GlobalOpts;
use crate::render;

/// Prints one page of search results.
pub async fn run(opts: &GlobalOpts, title: &str, page: u32, json: bool) -> Result<()> {
    let controller = super::controller(opts)?;

    let outcome = controller
        .dispatch(Intent::Search {
            query: title.to_string(),
            page,
        })
        .await;

    match outcome {
        Outcome::Transitioned(View::Results(results)) => {
            if json {
                let body = json!({
                    "query": results.query,
                    "page": results.page,
                    "total_pages": results.total_pages,
                    "total_results": results.total_results,
                    "items": results.items,
                    "pagination": results.pagination.controls(),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                render::print_results(&results);
            }
            Ok(())
        }
        Outcome::Rejected { error, .. } => bail!(error),
        other => bail!("Unexpected navigation outcome: {:?}", other),
    }
}
