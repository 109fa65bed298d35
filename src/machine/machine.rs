//! Table-driven state machine with entry and transition callbacks.

use crate::core::{Action, Event, Guard, State, TransitionError};
use crate::machine::row::Row;
use std::collections::HashMap;

/// How a machine picks its state when started.
#[derive(Clone, Debug)]
pub enum InitialState<S: State> {
    /// Always start in this state.
    Fixed(S),

    /// Start in `then` when the guard passes, otherwise in `otherwise`.
    Guarded { guard: Guard, then: S, otherwise: S },
}

impl<S: State> InitialState<S> {
    fn resolve(&self) -> Result<S, TransitionError> {
        match self {
            Self::Fixed(state) => Ok(*state),
            Self::Guarded {
                guard,
                then,
                otherwise,
            } => Ok(if guard.check()? { *then } else { *otherwise }),
        }
    }

    fn provisional(&self) -> S {
        match self {
            Self::Fixed(state) => *state,
            Self::Guarded { then, .. } => *then,
        }
    }
}

/// Guarded finite state machine.
///
/// Rows are scanned in insertion order and the first row whose source
/// state, event and guard all match wins. An event that matches no row is
/// ignored: the state stays put and no callback runs.
///
/// On a matched row the machine:
/// 1. runs the transition action registered for `(current, to)`, if any
/// 2. moves to `to`
/// 3. runs the entry action registered for `to`, if any
///
/// Entry actions also run on self-transitions.
pub struct Machine<S: State, E: Event> {
    current: S,
    initial: InitialState<S>,
    rows: Vec<Row<S, E>>,
    on_entry: HashMap<S, Action>,
    on_transition: Vec<(S, S, Action)>,
    debug: bool,
}

impl<S: State, E: Event> Machine<S, E> {
    /// Create a machine with no rows.
    ///
    /// Until [`start`](Self::start) is called the current state is the
    /// fixed initial state, or the `then` branch of a guarded one.
    pub fn new(initial: InitialState<S>) -> Self {
        Self {
            current: initial.provisional(),
            initial,
            rows: Vec::new(),
            on_entry: HashMap::new(),
            on_transition: Vec::new(),
            debug: false,
        }
    }

    /// Append a row to the table.
    pub fn add_row(&mut self, row: Row<S, E>) {
        self.rows.push(row);
    }

    /// Register the action run whenever `state` is entered.
    pub fn set_entry_action(&mut self, state: S, action: Action) {
        self.on_entry.insert(state, action);
    }

    /// Register the action run on the exact `from -> to` transition.
    pub fn set_transition_action(&mut self, from: S, to: S, action: Action) {
        self.on_transition.retain(|(f, t, _)| !(*f == from && *t == to));
        self.on_transition.push((from, to, action));
    }

    /// Compute and set the initial state. No callbacks run.
    pub fn start(&mut self) -> Result<S, TransitionError> {
        self.current = self.initial.resolve()?;
        tracing::trace!(state = self.current.name(), "machine started");
        Ok(self.current)
    }

    /// Get current state
    pub fn current_state(&self) -> S {
        self.current
    }

    /// Overwrite the current state without running any callback.
    ///
    /// Meant for restoring a persisted state, not for driving the flow.
    pub fn set_current_state(&mut self, state: S) {
        self.current = state;
    }

    /// Table rows in evaluation order.
    pub fn rows(&self) -> &[Row<S, E>] {
        &self.rows
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Feed one event into the machine.
    ///
    /// Returns the destination state when a row fired, `None` when the
    /// event was ignored. Guard and action failures are returned as is;
    /// a failing transition action leaves the state unchanged, a failing
    /// entry action leaves the machine in the new state.
    pub fn process_event(&mut self, event: E) -> Result<Option<S>, TransitionError> {
        let from = self.current;

        let mut target = None;
        for row in &self.rows {
            if row.matches(&from, &event)? {
                target = Some(row.to);
                break;
            }
        }

        let Some(to) = target else {
            if self.debug {
                tracing::debug!(
                    event = event.name(),
                    state = from.name(),
                    "event matched no transition"
                );
            }
            return Ok(None);
        };

        if self.debug {
            tracing::debug!(
                event = event.name(),
                from = from.name(),
                to = to.name(),
                "transition"
            );
        }

        if let Some((_, _, action)) = self
            .on_transition
            .iter()
            .find(|(f, t, _)| *f == from && *t == to)
        {
            action.run()?;
        }

        self.current = to;

        if let Some(action) = self.on_entry.get(&to) {
            action.run()?;
        }

        Ok(Some(to))
    }
}

impl<S: State, E: Event> std::fmt::Debug for Machine<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.current)
            .field("rows", &self.rows.len())
            .field("debug", &self.debug)
            .finish()
    }
}
