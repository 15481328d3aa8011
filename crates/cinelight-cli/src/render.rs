//! Terminal rendering of controller views.

use cinelight_application::{ResultsView, View};
use cinelight_core::{MovieDetail, NavigationError, PageControl, Pagination};
use colored::Colorize;

pub fn print_view(view: &View) {
    match view {
        View::Start => print_start(),
        View::Results(results) => print_results(results),
        View::Details(detail) => print_details(detail),
    }
}

pub fn print_start() {
    println!("{}", "Type a movie title to search.".bright_black());
}

pub fn print_results(view: &ResultsView) {
    println!(
        "{}",
        format!(
            "Results for \"{}\" ({} found, page {} of {})",
            view.query, view.total_results, view.page, view.total_pages
        )
        .bright_magenta()
        .bold()
    );

    for (index, item) in view.items.iter().enumerate() {
        println!(
            "{} {}  {}  {}",
            format!("{:>3}.", index + 1).bright_black(),
            item.label().bright_blue(),
            format!("[{}]", item.media_type).yellow(),
            item.imdb_id.bright_black()
        );
    }

    let row = pagination_row(&view.pagination);
    if !row.is_empty() {
        println!();
        println!("{}", row);
    }
    println!(
        "{}",
        "Use /open <n> for details, /next and /prev to page.".bright_black()
    );
}

pub fn print_details(detail: &MovieDetail) {
    println!("{}", detail.title.bright_magenta().bold());
    if let Some(poster) = &detail.poster_url {
        println!("{}", poster.bright_black());
    }
    println!();

    for (label, value) in detail.info_fields() {
        println!("{} {}", format!("{:>13}:", label).cyan(), value);
    }

    if !detail.plot.is_empty() {
        println!();
        println!("{}", detail.plot);
    }

    if !detail.ratings.is_empty() {
        println!();
        for rating in &detail.ratings {
            println!("  {} {}", rating.value.yellow(), rating.source.bright_black());
        }
    }

    println!();
    println!("{} {}", "IMDb:".cyan(), detail.imdb_url().underline());
    println!("{}", "Use /back to return to the results.".bright_black());
}

pub fn print_error(error: &NavigationError) {
    let message = error.to_string();
    if error.is_validation() {
        println!("{}", message.yellow());
    } else {
        println!("{}", message.red());
    }
}

/// One-line rendering of the pagination controls. Empty when there is at most
/// one page.
pub fn pagination_row(pagination: &Pagination) -> String {
    pagination
        .controls()
        .iter()
        .map(control_label)
        .collect::<Vec<_>>()
        .join(" ")
}

fn control_label(control: &PageControl) -> String {
    match control {
        PageControl::Prev { target } => {
            let label = "‹ Prev";
            if target.is_some() {
                label.to_string()
            } else {
                label.dimmed().to_string()
            }
        }
        PageControl::Next { target } => {
            let label = "Next ›";
            if target.is_some() {
                label.to_string()
            } else {
                label.dimmed().to_string()
            }
        }
        PageControl::Page {
            number,
            active: true,
        } => format!("[{}]", number).bright_green().bold().to_string(),
        PageControl::Page { number, .. } => number.to_string(),
        PageControl::Ellipsis => "…".bright_black().to_string(),
    }
}
