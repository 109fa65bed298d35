//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Action, Event, Guard, State};
use crate::machine::{InitialState, Machine, Row};

/// Builder for constructing state machines with a fluent API.
///
/// The table is fixed once built; rows keep the order they were added in.
pub struct MachineBuilder<S: State, E: Event> {
    initial: Option<InitialState<S>>,
    rows: Vec<Row<S, E>>,
    on_entry: Vec<(S, Action)>,
    on_transition: Vec<(S, S, Action)>,
}

impl<S: State, E: Event> MachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            rows: Vec::new(),
            on_entry: Vec::new(),
            on_transition: Vec::new(),
        }
    }

    /// Set a fixed initial state.
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(InitialState::Fixed(state));
        self
    }

    /// Pick the initial state with a guard when the machine starts.
    pub fn initial_when(mut self, guard: Guard, then: S, otherwise: S) -> Self {
        self.initial = Some(InitialState::Guarded {
            guard,
            then,
            otherwise,
        });
        self
    }

    /// Append a pre-built row.
    pub fn row(mut self, row: Row<S, E>) -> Self {
        self.rows.push(row);
        self
    }

    /// Append several rows at once.
    pub fn rows<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = Row<S, E>>,
    {
        self.rows.extend(rows);
        self
    }

    /// Run `action` on entry to `state`. Absent actions are skipped.
    pub fn on_entry(mut self, state: S, action: Option<Action>) -> Self {
        if let Some(action) = action {
            self.on_entry.push((state, action));
        }
        self
    }

    /// Run `action` on the `from -> to` transition. Absent actions are skipped.
    pub fn on_transition(mut self, from: S, to: S, action: Option<Action>) -> Self {
        if let Some(action) = action {
            self.on_transition.push((from, to, action));
        }
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Machine<S, E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.rows.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut machine = Machine::new(initial);
        for row in self.rows {
            machine.add_row(row);
        }
        for (state, action) in self.on_entry {
            machine.set_entry_action(state, action);
        }
        for (from, to, action) in self.on_transition {
            machine.set_transition_action(from, to, action);
        }

        Ok(machine)
    }
}

impl<S: State, E: Event> Default for MachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{guarded_row, row};
    use serde::{Deserialize, Serialize};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum TestEvent {
        Advance,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            "Advance"
        }
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = MachineBuilder::<TestState, TestEvent>::new().build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_requires_rows() {
        let result = MachineBuilder::<TestState, TestEvent>::new()
            .initial(TestState::Initial)
            .build();

        assert!(matches!(result, Err(BuildError::NoTransitions)));
    }

    #[test]
    fn fluent_api_builds_machine() {
        let entered = Rc::new(Cell::new(false));
        let flag = Rc::clone(&entered);

        let mut machine = MachineBuilder::new()
            .initial(TestState::Initial)
            .row(row(TestState::Initial, TestEvent::Advance, TestState::Processing))
            .rows([guarded_row(
                TestState::Processing,
                TestEvent::Advance,
                Guard::always(),
                TestState::Complete,
            )])
            .on_entry(TestState::Complete, Some(Action::new(move || flag.set(true))))
            .on_entry(TestState::Processing, None)
            .build()
            .unwrap();

        assert_eq!(machine.rows().len(), 2);
        machine.process_event(TestEvent::Advance).unwrap();
        machine.process_event(TestEvent::Advance).unwrap();
        assert_eq!(machine.current_state(), TestState::Complete);
        assert!(entered.get());
    }
}
