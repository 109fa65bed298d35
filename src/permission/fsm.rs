//! The permission request flow as a guarded state machine.
//!
//! ```text
//! [*] --> Start      : [modal]
//! [*] --> Rationale  : [!modal]
//! Start      --> Granted    : Dispatch [granted]
//! Start      --> Rationale  : Dispatch [!granted && rationale]
//! Start      --> Requesting : Dispatch [!granted && !rationale]
//! Rationale  --> Requesting : Dispatch
//! Rationale  --> Start      : Reject [modal]
//! Requesting --> Granted    : Granted
//! Requesting --> Start      : Denied / on_denied [rationale && modal]
//! Requesting --> Rationale  : Denied / on_denied [rationale && !modal]
//! Requesting --> Denied     : Denied [!rationale]
//! Denied     --> Denied     : Dispatch [!granted]
//! Denied     --> Granted    : Dispatch [granted]
//! Granted    --> Denied     : Dispatch [!granted]
//! Granted    --> Granted    : Dispatch [granted]
//!
//! Granted    : entry / on_granted
//! Rationale  : entry / on_rationale
//! Requesting : entry / on_request
//! Denied     : entry / on_denied_permanently
//! ```

use crate::builder::{guarded_row, row, BuildError, MachineBuilder};
use crate::core::{Action, Event, Guard};
use crate::machine::{Machine, Row};

crate::state_enum! {
    /// Position in the permission flow.
    pub enum FlowState {
        /// Idle, waiting for the gated action to be attempted.
        Start,
        /// Rationale is being shown.
        Rationale,
        /// A permission request is in flight.
        Requesting,
        /// Every permission is granted.
        Granted,
        /// Denied without further rationale; the user must change settings.
        Denied,
    }
}

/// Stimuli driving the permission flow.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FlowEvent {
    /// The caller wants to perform the gated action.
    Dispatch,
    /// The host reported every permission granted.
    Granted,
    /// The host reported at least one permission denied.
    Denied,
    /// The user rejected the rationale.
    Reject,
}

impl Event for FlowEvent {
    fn name(&self) -> &str {
        match self {
            Self::Dispatch => "Dispatch",
            Self::Granted => "Granted",
            Self::Denied => "Denied",
            Self::Reject => "Reject",
        }
    }
}

/// The three facts the flow branches on.
#[derive(Clone, Debug)]
pub struct FlowGuards {
    pub is_granted: Guard,
    pub can_show_rationale: Guard,
    pub is_rationale_modal: Guard,
}

/// Callbacks fired by the flow. `None` means nothing happens.
#[derive(Clone, Debug, Default)]
pub struct FlowActions {
    pub on_granted: Option<Action>,
    pub on_rationale: Option<Action>,
    pub on_request: Option<Action>,
    pub on_denied: Option<Action>,
    pub on_denied_permanently: Option<Action>,
}

/// The fixed transition table, in evaluation order.
pub fn permission_table(guards: &FlowGuards) -> Vec<Row<FlowState, FlowEvent>> {
    use FlowEvent as E;
    use FlowState as S;

    let granted = guards.is_granted.clone();
    let rationale = guards.can_show_rationale.clone();
    let modal = guards.is_rationale_modal.clone();

    vec![
        guarded_row(S::Start, E::Dispatch, granted.clone(), S::Granted),
        guarded_row(S::Start, E::Dispatch, !granted.clone() & rationale.clone(), S::Rationale),
        guarded_row(S::Start, E::Dispatch, !granted.clone() & !rationale.clone(), S::Requesting),
        row(S::Rationale, E::Dispatch, S::Requesting),
        guarded_row(S::Rationale, E::Reject, modal.clone(), S::Start),
        row(S::Requesting, E::Granted, S::Granted),
        guarded_row(S::Requesting, E::Denied, rationale.clone() & modal.clone(), S::Start),
        guarded_row(S::Requesting, E::Denied, rationale.clone() & !modal.clone(), S::Rationale),
        guarded_row(S::Requesting, E::Denied, !rationale, S::Denied),
        guarded_row(S::Denied, E::Dispatch, !granted.clone(), S::Denied),
        guarded_row(S::Denied, E::Dispatch, granted.clone(), S::Granted),
        guarded_row(S::Granted, E::Dispatch, !granted.clone(), S::Denied),
        guarded_row(S::Granted, E::Dispatch, granted, S::Granted),
    ]
}

/// Assemble the permission flow machine. The machine is not started.
pub fn permission_machine(
    guards: FlowGuards,
    actions: FlowActions,
) -> Result<Machine<FlowState, FlowEvent>, BuildError> {
    use FlowState as S;

    MachineBuilder::new()
        .initial_when(guards.is_rationale_modal.clone(), S::Start, S::Rationale)
        .rows(permission_table(&guards))
        .on_entry(S::Granted, actions.on_granted)
        .on_entry(S::Rationale, actions.on_rationale)
        .on_entry(S::Requesting, actions.on_request)
        .on_entry(S::Denied, actions.on_denied_permanently)
        .on_transition(S::Requesting, S::Start, actions.on_denied.clone())
        .on_transition(S::Requesting, S::Rationale, actions.on_denied)
        .build()
}
