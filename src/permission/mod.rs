//! Runtime permission flow built on the guarded state machine.
//!
//! [`PermissionFlow`] gates an action behind a set of permissions. Each
//! attempt re-evaluates the live grant status and walks the caller through
//! rationale, request and denial using the table in [`fsm`].
//!
//! Host platform facilities (permission query, request, rationale
//! heuristic, settings screen) are reached through the traits in [`host`]
//! and [`settings`], so the flow runs unchanged against a real host or a
//! test double.

mod builder;
mod error;
mod flow;
pub mod fsm;
pub mod host;
pub mod settings;

pub use builder::PermissionFlowBuilder;
pub use error::FlowError;
pub use flow::PermissionFlow;
pub use fsm::{FlowEvent, FlowState};
pub use host::{has_permissions, GrantResult, HostContext, PermissionHost};
pub use settings::{launch_application_details_settings, SettingsIntent, SettingsLauncher};
