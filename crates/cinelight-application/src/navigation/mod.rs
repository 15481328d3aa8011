//! Navigation between the start, results and details pages.
//!
//! The presentation layer dispatches [`Intent`]s into a [`NavigationController`]
//! and renders the [`View`] carried by the returned [`Outcome`]. It never
//! touches the session state directly.

pub mod controller;
pub mod intent;
pub mod sequence;
pub mod view;

pub use controller::{DEFAULT_REQUEST_TIMEOUT, NavigationController};
pub use intent::Intent;
pub use sequence::{RequestSequencer, RequestTicket};
pub use view::{Outcome, ResultsView, View};
