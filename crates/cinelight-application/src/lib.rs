//! Application layer: turns user intents into session state transitions.

pub mod navigation;

pub use navigation::{Intent, NavigationController, Outcome, ResultsView, View};
