//! Fluent configuration of a [`PermissionFlow`].

use crate::builder::BuildError;
use crate::core::{Action, Guard};
use crate::permission::flow::PermissionFlow;
use crate::permission::fsm::{permission_machine, FlowActions, FlowGuards};
use crate::permission::host::{has_permissions, HostContext, PermissionHost};
use std::cell::Cell;
use std::rc::Rc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for [`PermissionFlow`].
///
/// A flow needs either exactly one host (activity or fragment), or, for
/// headless use and tests, all three overrides: `on_request`,
/// `can_show_rationale` and `is_permission_granted`. Overrides also
/// replace the host-backed defaults when a host is present.
pub struct PermissionFlowBuilder {
    request_code: i32,
    permissions: Vec<String>,
    activity: Option<Rc<dyn PermissionHost>>,
    fragment: Option<Rc<dyn PermissionHost>>,
    modal: bool,
    on_granted: Option<Action>,
    on_rationale: Option<Action>,
    on_denied: Option<Action>,
    on_denied_permanently: Option<Action>,
    on_request: Option<Action>,
    can_show_rationale: Option<Guard>,
    is_permission_granted: Option<Guard>,
}

impl PermissionFlowBuilder {
    pub fn new<I, P>(request_code: i32, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            request_code,
            permissions: permissions.into_iter().map(Into::into).collect(),
            activity: None,
            fragment: None,
            modal: false,
            on_granted: None,
            on_rationale: None,
            on_denied: None,
            on_denied_permanently: None,
            on_request: None,
            can_show_rationale: None,
            is_permission_granted: None,
        }
    }

    /// Bind to an activity-like host.
    pub fn activity(mut self, host: Rc<dyn PermissionHost>) -> Self {
        self.activity = Some(host);
        self
    }

    /// Bind to a fragment-like host.
    pub fn fragment(mut self, host: Rc<dyn PermissionHost>) -> Self {
        self.fragment = Some(host);
        self
    }

    /// Modal (dialog) rationale when `true`, full-screen when `false` (default).
    pub fn modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    pub fn on_granted(mut self, action: Action) -> Self {
        self.on_granted = Some(action);
        self
    }

    /// Show rationale. Without it the default rationale check is always `false`.
    pub fn on_rationale(mut self, action: Action) -> Self {
        self.on_rationale = Some(action);
        self
    }

    /// Denied, but permissions may be requested again.
    pub fn on_denied(mut self, action: Action) -> Self {
        self.on_denied = Some(action);
        self
    }

    pub fn on_denied_permanently(mut self, action: Action) -> Self {
        self.on_denied_permanently = Some(action);
        self
    }

    /// Replace the host permission request.
    pub fn on_request(mut self, action: Action) -> Self {
        self.on_request = Some(action);
        self
    }

    /// Replace the host rationale heuristic.
    pub fn can_show_rationale(mut self, guard: Guard) -> Self {
        self.can_show_rationale = Some(guard);
        self
    }

    /// Replace the host grant check.
    pub fn is_permission_granted(mut self, guard: Guard) -> Self {
        self.is_permission_granted = Some(guard);
        self
    }

    /// Check the configuration, collecting every problem.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = Vec::new();

        let check = if self.activity.is_some() && self.fragment.is_some() {
            Validation::fail(BuildError::ConflictingHosts)
        } else {
            Validation::success(())
        };
        checks.push(check);

        if self.activity.is_none() && self.fragment.is_none() {
            let overrides = [
                ("on_request", self.on_request.is_some()),
                ("can_show_rationale", self.can_show_rationale.is_some()),
                ("is_permission_granted", self.is_permission_granted.is_some()),
            ];
            for (name, present) in overrides {
                let check = if present {
                    Validation::success(())
                } else {
                    Validation::fail(BuildError::MissingOverride(name))
                };
                checks.push(check);
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate, wire the machine and start it.
    pub fn build(self) -> Result<PermissionFlow, BuildError> {
        if let Validation::Failure(errors) = self.validate() {
            let mut problems: Vec<BuildError> = errors.iter().cloned().collect();
            return Err(if problems.len() == 1 {
                problems.remove(0)
            } else {
                BuildError::Invalid(problems)
            });
        }

        let host = match (self.activity, self.fragment) {
            (Some(activity), None) => Some(HostContext::Activity(activity)),
            (None, Some(fragment)) => Some(HostContext::Fragment(fragment)),
            _ => None,
        };
        let permissions: Rc<[String]> = self.permissions.into();
        let modal = Rc::new(Cell::new(self.modal));
        let has_rationale = self.on_rationale.is_some();

        let guards = FlowGuards {
            is_granted: self
                .is_permission_granted
                .unwrap_or_else(|| default_is_granted(host.clone(), Rc::clone(&permissions))),
            can_show_rationale: self.can_show_rationale.unwrap_or_else(|| {
                default_can_show_rationale(host.clone(), Rc::clone(&permissions), has_rationale)
            }),
            is_rationale_modal: {
                let modal = Rc::clone(&modal);
                Guard::new(move || modal.get())
            },
        };

        let request_code = self.request_code;
        let on_request = self.on_request.or_else(|| {
            host.clone()
                .map(|host| default_request(host, Rc::clone(&permissions), request_code))
        });

        let actions = FlowActions {
            on_granted: self.on_granted,
            on_rationale: self.on_rationale,
            on_request,
            on_denied: self.on_denied,
            on_denied_permanently: self.on_denied_permanently,
        };

        let mut machine = permission_machine(guards, actions)?;
        let initial = machine.start()?;
        tracing::debug!(
            host = host.as_ref().map_or("none", HostContext::kind),
            request_code,
            permissions = ?permissions,
            initial = ?initial,
            "permission flow built"
        );

        Ok(PermissionFlow::from_parts(
            machine,
            host,
            request_code,
            permissions,
            modal,
        ))
    }
}

fn default_is_granted(host: Option<HostContext>, permissions: Rc<[String]>) -> Guard {
    Guard::new(move || match &host {
        Some(context) => {
            context.host().is_attached() && has_permissions(context.host(), &permissions[..])
        }
        None => false,
    })
}

fn default_can_show_rationale(
    host: Option<HostContext>,
    permissions: Rc<[String]>,
    has_rationale: bool,
) -> Guard {
    Guard::new(move || {
        if !has_rationale {
            return false;
        }
        host.as_ref().is_some_and(|context| {
            permissions
                .iter()
                .any(|p| context.host().should_show_rationale(p))
        })
    })
}

fn default_request(host: HostContext, permissions: Rc<[String]>, request_code: i32) -> Action {
    Action::new(move || {
        tracing::debug!(host = host.kind(), request_code, "requesting permissions");
        host.host().request_permissions(&permissions, request_code);
    })
}
