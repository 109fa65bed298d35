//! Permflow: a guarded state machine for runtime permission flows
//!
//! Calling code that needs a revocable permission should not have to track
//! whether it already asked, whether rationale was shown or whether the user
//! revoked the grant in settings. Permflow encodes that flow as a small,
//! table-driven state machine and re-evaluates it on every attempt.
//!
//! # Core Concepts
//!
//! - **State / Event**: bounded enums; the whole machine position is one `State` value
//! - **Guards**: zero-argument predicates evaluated fresh on each transition attempt
//! - **Rows**: `(from, event, guard, to)` entries, first match wins
//! - **Actions**: callbacks run on state entry or on a specific transition
//! - **Persistence**: current state and debug flag survive a save/restore cycle
//!
//! # Example
//!
//! ```rust
//! use permflow::core::{Action, Guard};
//! use permflow::permission::{FlowState, PermissionFlow};
//! use permflow::persist::Bundle;
//!
//! let mut flow = PermissionFlow::builder(42, ["camera"])
//!     .modal(true)
//!     .on_request(Action::new(|| {}))
//!     .is_permission_granted(Guard::new(|| true))
//!     .can_show_rationale(Guard::new(|| false))
//!     .build()
//!     .unwrap();
//!
//! flow.dispatch().unwrap();
//! assert_eq!(flow.current_state(), FlowState::Granted);
//!
//! let mut bundle = Bundle::new();
//! flow.save_state(&mut bundle).unwrap();
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod permission;
pub mod persist;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use core::{Action, Event, Guard, State, TransitionError};
pub use machine::{Machine, Row};
pub use permission::{FlowError, FlowEvent, FlowState, GrantResult, PermissionFlow};
