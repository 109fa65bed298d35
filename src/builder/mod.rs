//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder, row helpers and a macro for
//! declaring state enums with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;

use crate::core::{Event, Guard, State};
use crate::machine::Row;

/// Create an unguarded row.
///
/// # Example
///
/// ```
/// use permflow::builder::row;
/// use permflow::core::Event;
/// use permflow::state_enum;
///
/// state_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
/// }
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// struct Go;
///
/// impl Event for Go {
///     fn name(&self) -> &str { "Go" }
/// }
///
/// let row = row(MyState::Start, Go, MyState::End);
/// assert!(row.guard.is_none());
/// ```
pub fn row<S: State, E: Event>(from: S, event: E, to: S) -> Row<S, E> {
    Row::new(from, event, to)
}

/// Create a row gated by `guard`.
pub fn guarded_row<S: State, E: Event>(from: S, event: E, guard: Guard, to: S) -> Row<S, E> {
    Row::new(from, event, to).when(guard)
}
