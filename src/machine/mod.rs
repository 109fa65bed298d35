//! Generic guarded state machine engine.
//!
//! # Key Concepts
//!
//! - **Rows**: `(from, event, guard, to)` entries scanned in order, first match wins
//! - **Entry actions**: run whenever a state is entered through a row
//! - **Transition actions**: run on one exact `(from, to)` pair, before the entry action
//!
//! The engine is synchronous and single-threaded. Every call to
//! [`Machine::process_event`] performs at most one transition.

#[allow(clippy::module_inception)]
mod machine;
mod row;

pub use machine::{InitialState, Machine};
pub use row::Row;
