//! Core state machine types.
//!
//! This module contains the building blocks the engine is assembled from:
//! - State and event definitions via the `State` and `Event` traits
//! - Guard predicates and their `and` / `not` combinators
//! - Entry and transition actions
//!
//! Nothing here knows about permissions; the permission flow is one
//! particular table wired from these pieces.

mod action;
mod error;
mod guard;
mod state;

pub use action::Action;
pub use error::TransitionError;
pub use guard::Guard;
pub use state::{Event, State};
