//! Controller that owns a permission set and drives it through the flow.

use crate::core::State;
use crate::machine::Machine;
use crate::permission::builder::PermissionFlowBuilder;
use crate::permission::error::FlowError;
use crate::permission::fsm::{FlowEvent, FlowState};
use crate::permission::host::{GrantResult, HostContext};
use crate::persist::{self, InstanceStore, PersistError};
use std::cell::Cell;
use std::rc::Rc;

const DEBUG_KEY_PREFIX: &str = "permflow.PermissionFlow.DEBUG";
const STATE_KEY_PREFIX: &str = "permflow.PermissionFlow.FSM_STATE";

/// Store keys for one permission set, so that several flows can share a store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct StateKeys {
    pub(crate) debug: String,
    pub(crate) state: String,
}

impl StateKeys {
    pub(crate) fn for_permissions(permissions: &[String]) -> Self {
        Self {
            debug: namespaced_key(DEBUG_KEY_PREFIX, permissions),
            state: namespaced_key(STATE_KEY_PREFIX, permissions),
        }
    }
}

fn namespaced_key(prefix: &str, permissions: &[String]) -> String {
    let mut key = format!("{prefix}:");
    for permission in permissions {
        key.push_str(permission);
        key.push(';');
    }
    key
}

/// Gate for an action that needs runtime-revocable permissions.
///
/// Call [`dispatch`](Self::dispatch) every time the gated action is
/// attempted. The flow re-checks the live grant status, shows rationale,
/// requests permissions and reports denial through the callbacks it was
/// built with. Request results come back through
/// [`deliver_request_result`](Self::deliver_request_result).
///
/// The flow is single-threaded: it is neither `Send` nor `Sync`, and every
/// call, including result delivery, must come from the owning thread.
///
/// # Example
///
/// ```rust
/// use permflow::core::{Action, Guard};
/// use permflow::permission::{FlowState, GrantResult, PermissionFlow};
///
/// let mut flow = PermissionFlow::builder(7, ["camera"])
///     .modal(true)
///     .on_request(Action::new(|| {}))
///     .is_permission_granted(Guard::new(|| false))
///     .can_show_rationale(Guard::new(|| false))
///     .build()
///     .unwrap();
///
/// flow.dispatch().unwrap();
/// assert_eq!(flow.current_state(), FlowState::Requesting);
///
/// let requested = ["camera"];
/// let results = [GrantResult::Granted];
/// flow.deliver_request_result(7, Some(&requested[..]), Some(&results[..]))
///     .unwrap();
/// assert_eq!(flow.current_state(), FlowState::Granted);
/// ```
#[derive(Debug)]
pub struct PermissionFlow {
    machine: Machine<FlowState, FlowEvent>,
    host: Option<HostContext>,
    request_code: i32,
    permissions: Rc<[String]>,
    denied: Vec<String>,
    modal: Rc<Cell<bool>>,
    keys: StateKeys,
}

impl PermissionFlow {
    /// Start configuring a flow for `permissions`, correlated by `request_code`.
    pub fn builder<I, P>(request_code: i32, permissions: I) -> PermissionFlowBuilder
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        PermissionFlowBuilder::new(request_code, permissions)
    }

    pub(crate) fn from_parts(
        machine: Machine<FlowState, FlowEvent>,
        host: Option<HostContext>,
        request_code: i32,
        permissions: Rc<[String]>,
        modal: Rc<Cell<bool>>,
    ) -> Self {
        let keys = StateKeys::for_permissions(&permissions);
        Self {
            machine,
            host,
            request_code,
            permissions,
            denied: Vec::new(),
            modal,
            keys,
        }
    }

    /// Attempt the gated action.
    pub fn dispatch(&mut self) -> Result<(), FlowError> {
        self.machine.process_event(FlowEvent::Dispatch)?;
        Ok(())
    }

    /// The user accepted the rationale; proceed to requesting.
    pub fn accept_rationale(&mut self) -> Result<(), FlowError> {
        tracing::trace!(state = self.machine.current_state().name(), "rationale accepted");
        self.dispatch()
    }

    /// The user rejected the rationale.
    pub fn reject_rationale(&mut self) -> Result<(), FlowError> {
        tracing::trace!(state = self.machine.current_state().name(), "rationale rejected");
        self.machine.process_event(FlowEvent::Reject)?;
        Ok(())
    }

    /// Feed back the host's answer to a permission request.
    ///
    /// Results carrying another `request_code` belong to someone else and
    /// are ignored. Each permission of this flow counts as granted only if
    /// it appears in `permissions` with a granted result; the denied ones
    /// become the new [`denied_permissions`](Self::denied_permissions).
    /// Both arrays must be present and of equal length, otherwise nothing
    /// changes and an error is returned.
    pub fn deliver_request_result<P: AsRef<str>>(
        &mut self,
        request_code: i32,
        permissions: Option<&[P]>,
        grant_results: Option<&[GrantResult]>,
    ) -> Result<(), FlowError> {
        if request_code != self.request_code {
            tracing::debug!(
                request_code,
                expected = self.request_code,
                "ignoring result for another request"
            );
            return Ok(());
        }

        let permissions = permissions.ok_or(FlowError::MissingResult("permissions"))?;
        let grant_results = grant_results.ok_or(FlowError::MissingResult("grant results"))?;
        if permissions.len() != grant_results.len() {
            return Err(FlowError::ResultLengthMismatch {
                permissions: permissions.len(),
                grant_results: grant_results.len(),
            });
        }

        self.denied = self
            .permissions
            .iter()
            .filter(|required| !is_granted(permissions, grant_results, required))
            .cloned()
            .collect();

        let event = if self.denied.is_empty() {
            FlowEvent::Granted
        } else {
            FlowEvent::Denied
        };
        self.machine.process_event(event)?;
        Ok(())
    }

    /// Permissions denied by the most recent request result.
    ///
    /// Empty until a result has been delivered.
    pub fn denied_permissions(&self) -> &[String] {
        &self.denied
    }

    /// Switch between modal (dialog) and full-screen rationale.
    pub fn set_modal_rationale(&mut self, modal: bool) {
        self.modal.set(modal);
    }

    pub fn is_modal_rationale(&self) -> bool {
        self.modal.get()
    }

    /// Write the current state and debug flag to `store`.
    pub fn save_state(&self, store: &mut dyn InstanceStore) -> Result<(), PersistError> {
        store.put_bool(&self.keys.debug, self.machine.debug());
        persist::save_state(store, &self.keys.state, self.machine.current_state())
    }

    /// Restore what [`save_state`](Self::save_state) wrote.
    ///
    /// Slots missing from `store` leave the current values alone. No
    /// callbacks run.
    pub fn restore_state(&mut self, store: &dyn InstanceStore) -> Result<(), PersistError> {
        let state = persist::load_state::<FlowState>(store, &self.keys.state)?;

        if let Some(debug) = store.get_bool(&self.keys.debug) {
            self.machine.set_debug(debug);
        }
        if let Some(state) = state {
            tracing::debug!(state = state.name(), "restored permission flow state");
            self.machine.set_current_state(state);
        }
        Ok(())
    }

    /// Log every transition through `tracing` when enabled.
    pub fn set_debug(&mut self, debug: bool) {
        self.machine.set_debug(debug);
    }

    pub fn debug(&self) -> bool {
        self.machine.debug()
    }

    pub fn current_state(&self) -> FlowState {
        self.machine.current_state()
    }

    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn request_code(&self) -> i32 {
        self.request_code
    }

    pub fn host(&self) -> Option<&HostContext> {
        self.host.as_ref()
    }
}

fn is_granted<P: AsRef<str>>(
    permissions: &[P],
    grant_results: &[GrantResult],
    required: &str,
) -> bool {
    permissions
        .iter()
        .zip(grant_results)
        .any(|(permission, result)| permission.as_ref() == required && result.is_granted())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_permission_set() {
        let keys = StateKeys::for_permissions(&["camera".to_string(), "mic".to_string()]);

        assert_eq!(keys.debug, "permflow.PermissionFlow.DEBUG:camera;mic;");
        assert_eq!(keys.state, "permflow.PermissionFlow.FSM_STATE:camera;mic;");
        assert_ne!(keys, StateKeys::for_permissions(&["camera".to_string()]));
    }

    #[test]
    fn is_granted_matches_by_name() {
        let requested = ["b", "a"];
        let results = [GrantResult::Denied, GrantResult::Granted];

        assert!(is_granted(&requested, &results, "a"));
        assert!(!is_granted(&requested, &results, "b"));
        assert!(!is_granted(&requested, &results, "c"));
    }
}
