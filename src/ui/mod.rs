//! User interface - menu rendering, animations, page lifecycle.
//!
//! [`controller::UiController`] is the runtime: it polls input, advances
//! every active [`crate::motion::Follower`], and composes each frame
//! (menu below, page above, inverse-video highlight on top).
//! [`progress::ProgressBar`] is the one shared widget.

pub mod controller;
pub mod progress;

pub use controller::{MenuOutcome, Transition, UiController};
