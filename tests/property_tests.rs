//! Property-based tests for the permission state machine.
//!
//! These tests use proptest to check the machine against a direct reading
//! of the transition table across every state, event and guard valuation.

use permflow::core::{Action, Guard};
use permflow::machine::Machine;
use permflow::permission::fsm::{permission_machine, FlowActions, FlowGuards};
use permflow::permission::{FlowEvent, FlowState, PermissionFlow};
use permflow::persist::{self, Bundle};
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

const STATE_KEY: &str = "permflow.PermissionFlow.FSM_STATE:camera;";

prop_compose! {
    fn arbitrary_state()(index in 0..FlowState::ALL.len()) -> FlowState {
        FlowState::ALL[index]
    }
}

fn arbitrary_event() -> impl Strategy<Value = FlowEvent> {
    prop_oneof![
        Just(FlowEvent::Dispatch),
        Just(FlowEvent::Granted),
        Just(FlowEvent::Denied),
        Just(FlowEvent::Reject),
    ]
}

/// Destination per the table, `None` when no row applies.
fn expected(state: FlowState, event: FlowEvent, g: bool, r: bool, m: bool) -> Option<FlowState> {
    use FlowEvent as E;
    use FlowState as S;

    match (state, event) {
        (S::Start, E::Dispatch) if g => Some(S::Granted),
        (S::Start, E::Dispatch) if r => Some(S::Rationale),
        (S::Start, E::Dispatch) => Some(S::Requesting),
        (S::Rationale, E::Dispatch) => Some(S::Requesting),
        (S::Rationale, E::Reject) if m => Some(S::Start),
        (S::Requesting, E::Granted) => Some(S::Granted),
        (S::Requesting, E::Denied) if r && m => Some(S::Start),
        (S::Requesting, E::Denied) if r => Some(S::Rationale),
        (S::Requesting, E::Denied) => Some(S::Denied),
        (S::Denied | S::Granted, E::Dispatch) if g => Some(S::Granted),
        (S::Denied | S::Granted, E::Dispatch) => Some(S::Denied),
        _ => None,
    }
}

fn machine_with(
    state: FlowState,
    g: bool,
    r: bool,
    m: bool,
    hits: &Rc<Cell<usize>>,
) -> Machine<FlowState, FlowEvent> {
    let counter = || {
        let hits = Rc::clone(hits);
        Some(Action::new(move || hits.set(hits.get() + 1)))
    };
    let guards = FlowGuards {
        is_granted: Guard::new(move || g),
        can_show_rationale: Guard::new(move || r),
        is_rationale_modal: Guard::new(move || m),
    };
    let actions = FlowActions {
        on_granted: counter(),
        on_rationale: counter(),
        on_request: counter(),
        on_denied: counter(),
        on_denied_permanently: counter(),
    };

    let mut machine = permission_machine(guards, actions).unwrap();
    machine.set_current_state(state);
    machine
}

fn headless_flow(hits: &Rc<Cell<usize>>) -> PermissionFlow {
    let counter = || {
        let hits = Rc::clone(hits);
        Action::new(move || hits.set(hits.get() + 1))
    };
    PermissionFlow::builder(1, ["camera"])
        .modal(true)
        .on_granted(counter())
        .on_rationale(counter())
        .on_denied(counter())
        .on_denied_permanently(counter())
        .on_request(counter())
        .is_permission_granted(Guard::new(|| false))
        .can_show_rationale(Guard::new(|| true))
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn machine_follows_first_matching_row(
        state in arbitrary_state(),
        event in arbitrary_event(),
        g in any::<bool>(),
        r in any::<bool>(),
        m in any::<bool>(),
    ) {
        let hits = Rc::new(Cell::new(0));
        let mut machine = machine_with(state, g, r, m, &hits);

        let outcome = machine.process_event(event).unwrap();
        let want = expected(state, event, g, r, m);

        prop_assert_eq!(outcome, want);
        prop_assert_eq!(machine.current_state(), want.unwrap_or(state));
    }

    #[test]
    fn unmatched_events_are_idempotent_no_ops(
        state in arbitrary_state(),
        event in arbitrary_event(),
        g in any::<bool>(),
        r in any::<bool>(),
        m in any::<bool>(),
    ) {
        prop_assume!(expected(state, event, g, r, m).is_none());

        let hits = Rc::new(Cell::new(0));
        let mut machine = machine_with(state, g, r, m, &hits);

        for _ in 0..3 {
            prop_assert_eq!(machine.process_event(event).unwrap(), None);
        }
        prop_assert_eq!(machine.current_state(), state);
        prop_assert_eq!(hits.get(), 0);
    }

    #[test]
    fn at_most_two_callbacks_per_event(
        state in arbitrary_state(),
        event in arbitrary_event(),
        g in any::<bool>(),
        r in any::<bool>(),
        m in any::<bool>(),
    ) {
        let hits = Rc::new(Cell::new(0));
        let mut machine = machine_with(state, g, r, m, &hits);

        machine.process_event(event).unwrap();
        prop_assert!(hits.get() <= 2);
    }

    #[test]
    fn start_depends_only_on_modal(m in any::<bool>(), g in any::<bool>(), r in any::<bool>()) {
        let hits = Rc::new(Cell::new(0));
        let mut machine = machine_with(FlowState::Granted, g, r, m, &hits);

        let initial = machine.start().unwrap();
        prop_assert_eq!(initial, if m { FlowState::Start } else { FlowState::Rationale });
        prop_assert_eq!(hits.get(), 0);
    }

    #[test]
    fn save_restore_round_trip(state in arbitrary_state(), debug in any::<bool>()) {
        let hits = Rc::new(Cell::new(0));

        let mut seed = Bundle::new();
        persist::save_state(&mut seed, STATE_KEY, state).unwrap();
        let mut original = headless_flow(&hits);
        original.restore_state(&seed).unwrap();
        original.set_debug(debug);

        let mut saved = Bundle::new();
        original.save_state(&mut saved).unwrap();
        let json = saved.to_json().unwrap();

        let mut restored = headless_flow(&hits);
        restored.restore_state(&Bundle::from_json(&json).unwrap()).unwrap();

        prop_assert_eq!(restored.current_state(), state);
        prop_assert_eq!(restored.debug(), debug);
        prop_assert_eq!(hits.get(), 0);
    }

    #[test]
    fn double_negation_is_identity(value in any::<bool>()) {
        let guard = Guard::new(move || value);
        prop_assert_eq!((!!guard.clone()).check().unwrap(), guard.check().unwrap());
    }

    #[test]
    fn conjunction_is_commutative(a in any::<bool>(), b in any::<bool>()) {
        let ga = Guard::new(move || a);
        let gb = Guard::new(move || b);
        prop_assert_eq!(
            (ga.clone() & gb.clone()).check().unwrap(),
            (gb & ga).check().unwrap()
        );
    }
}
