use std::sync::Arc;

use anyhow::Result;
use cinelight_application::{Intent, NavigationController, Outcome, View};
use cinelight_core::NavigationError;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use crate::GlobalOpts;
use crate::helper::CliHelper;
use crate::input::{self, ReplCommand, HELP};
use crate::render;

/// What the renderer shows for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    View(View),
    Error(NavigationError),
    /// An earlier step of the line moved the session to `view` before a
    /// later step failed.
    ErrorAfterMove { error: NavigationError, view: View },
}

/// Runs the interactive session until `quit`, `exit` or end of input.
///
/// Each line is dispatched on a background task so a slow lookup never blocks
/// the prompt. Screens are rendered by a single task in arrival order; a
/// response overtaken by a newer command comes back superseded and is skipped.
pub async fn run(opts: &GlobalOpts) -> Result<()> {
    let controller = Arc::new(super::controller(opts)?);

    let (screen_tx, mut screen_rx) = mpsc::channel::<Screen>(32);
    let renderer = tokio::spawn(async move {
        while let Some(screen) = screen_rx.recv().await {
            match screen {
                Screen::View(view) => render::print_view(&view),
                Screen::Error(error) => render::print_error(&error),
                Screen::ErrorAfterMove { error, view } => {
                    render::print_error(&error);
                    render::print_view(&view);
                }
            }
            println!();
        }
    });
    let mut lookups = JoinSet::new();

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Cinelight ===".bright_magenta().bold());
    println!(
        "{}",
        "Type a movie title to search, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    loop {
        while lookups.try_join_next().is_some() {}

        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C (type 'quit' to exit)".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Piped input ends here; let pending lookups print first.
                finish_pending(screen_tx, &mut lookups, renderer).await?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let command = match input::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                println!("{}", usage.yellow());
                continue;
            }
        };
        let _ = rl.add_history_entry(line.trim());

        match command {
            ReplCommand::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            ReplCommand::Help => {
                println!("{}", HELP.bright_black());
                continue;
            }
            _ => {}
        }

        let state = controller.state().await;
        let intents = match input::intents_for(command, &state) {
            Ok(intents) => intents,
            Err(message) => {
                println!("{}", message.yellow());
                continue;
            }
        };

        if let Some(indicator) = intents.iter().find_map(loading_indicator) {
            println!("{}", indicator.bright_black());
        }

        let controller = Arc::clone(&controller);
        let tx = screen_tx.clone();
        lookups.spawn(async move {
            if let Some(screen) = dispatch_chain(&controller, intents).await {
                let _ = tx.send(screen).await;
            }
        });
    }

    // In-flight lookups are abandoned on quit.
    lookups.abort_all();
    renderer.abort();
    Ok(())
}

/// Waits for every in-flight lookup and for the renderer to print what they
/// sent. The renderer stops once the last sender is gone.
async fn finish_pending(
    screen_tx: mpsc::Sender<Screen>,
    lookups: &mut JoinSet<()>,
    renderer: JoinHandle<()>,
) -> Result<()> {
    drop(screen_tx);
    while lookups.join_next().await.is_some() {}
    renderer.await?;
    Ok(())
}

/// Dispatches the intents of one input line in order and decides what to show.
///
/// Only the last step is shown on success. When a step fails after an earlier
/// one already moved the session, the error is shown together with the page
/// the session is now on. `None` means a newer line took over.
pub async fn dispatch_chain(
    controller: &NavigationController,
    intents: Vec<Intent>,
) -> Option<Screen> {
    let mut moved_to: Option<View> = None;
    for intent in intents {
        match controller.dispatch(intent).await {
            Outcome::Transitioned(view) => moved_to = Some(view),
            Outcome::Rejected { error, view } => {
                return Some(match moved_to {
                    Some(_) => Screen::ErrorAfterMove { error, view },
                    None => Screen::Error(error),
                });
            }
            Outcome::Superseded => return None,
        }
    }
    moved_to.map(Screen::View)
}

fn loading_indicator(intent: &Intent) -> Option<&'static str> {
    match intent {
        Intent::Search { .. } | Intent::ChangePage(_) | Intent::NextPage | Intent::PrevPage => {
            Some("Searching…")
        }
        Intent::SelectItem(_) => Some("Loading…"),
        Intent::Back | Intent::GoHome => None,
    }
}
