//! REPL line parsing.

use cinelight_application::Intent;
use cinelight_core::error::EMPTY_QUERY_MESSAGE;
use cinelight_core::{AppState, Page};

/// Slash commands offered for completion.
pub const COMMANDS: &[&str] = &[
    "/search", "/page", "/next", "/prev", "/open", "/back", "/home", "/help",
];

pub const HELP: &str = "\
Commands:
  <title>            search for a title
  /search <title>    search for a title
  /page <n>          jump to result page n
  /next, /prev       move between result pages
  /open <n|imdbID>   show details for result n or an IMDb id
  /back              return from details to the results
  /home              return to the start page
  /help              show this help
  quit, exit         leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Search(String),
    Page(u32),
    NextPage,
    PrevPage,
    Open(String),
    Back,
    Home,
    Help,
    Quit,
}

/// Parses a trimmed input line. `Ok(None)` for a blank line; `Err` carries a
/// usage message.
pub fn parse(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line == "quit" || line == "exit" {
        return Ok(Some(ReplCommand::Quit));
    }
    if !line.starts_with('/') {
        return Ok(Some(ReplCommand::Search(line.to_string())));
    }

    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let parsed = match command {
        // The controller validates the query itself.
        "/search" => ReplCommand::Search(argument.to_string()),
        "/page" => match argument.parse::<u32>() {
            Ok(page) => ReplCommand::Page(page),
            Err(_) => return Err("Usage: /page <n>".to_string()),
        },
        "/next" => ReplCommand::NextPage,
        "/prev" => ReplCommand::PrevPage,
        "/open" if !argument.is_empty() => ReplCommand::Open(argument.to_string()),
        "/open" => return Err("Usage: /open <n|imdbID>".to_string()),
        "/back" => ReplCommand::Back,
        "/home" => ReplCommand::Home,
        "/help" => ReplCommand::Help,
        other => return Err(format!("Unknown command: {} (try /help)", other)),
    };
    Ok(Some(parsed))
}

/// Maps a navigation command to the intents to dispatch, in order.
///
/// Searching from the details page goes home first, so a blank query is
/// refused here before leaving the page. `/open <n>` resolves against the
/// current result list.
pub fn intents_for(command: ReplCommand, state: &AppState) -> Result<Vec<Intent>, String> {
    let intents = match command {
        ReplCommand::Search(query) if state.page() == Page::Details => {
            if query.trim().is_empty() {
                return Err(EMPTY_QUERY_MESSAGE.to_string());
            }
            vec![Intent::GoHome, Intent::search(query)]
        }
        ReplCommand::Search(query) => vec![Intent::search(query)],
        ReplCommand::Page(page) => vec![Intent::ChangePage(page)],
        ReplCommand::NextPage => vec![Intent::NextPage],
        ReplCommand::PrevPage => vec![Intent::PrevPage],
        ReplCommand::Open(target) => vec![Intent::select(resolve_open_target(&target, state)?)],
        ReplCommand::Back => vec![Intent::Back],
        ReplCommand::Home => vec![Intent::GoHome],
        ReplCommand::Help | ReplCommand::Quit => Vec::new(),
    };
    Ok(intents)
}

fn resolve_open_target(target: &str, state: &AppState) -> Result<String, String> {
    match target.parse::<usize>() {
        Ok(index) => state
            .results()
            .get(index.wrapping_sub(1))
            .map(|item| item.imdb_id.clone())
            .ok_or_else(|| format!("There is no result number {} on this page.", index)),
        Err(_) => Ok(target.to_string()),
    }
}
