//! Transition table rows.

use crate::core::{Event, Guard, State, TransitionError};

/// One row of a transition table: `from --event [guard]--> to`.
///
/// A row without a guard always fires when its source state and event match.
#[derive(Clone, Debug)]
pub struct Row<S: State, E: Event> {
    pub from: S,
    pub event: E,
    pub guard: Option<Guard>,
    pub to: S,
}

impl<S: State, E: Event> Row<S, E> {
    /// Create an unguarded row.
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from,
            event,
            guard: None,
            to,
        }
    }

    /// Attach a guard to the row.
    pub fn when(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Check whether this row applies to `current` receiving `event`.
    ///
    /// The guard is only evaluated once state and event match.
    pub fn matches(&self, current: &S, event: &E) -> Result<bool, TransitionError> {
        if self.from != *current || self.event != *event {
            return Ok(false);
        }

        match &self.guard {
            Some(guard) => guard.check(),
            None => Ok(true),
        }
    }
}
