//! Core `State` and `Event` traits for state machine states and stimuli.
//!
//! States are small, bounded enumerations. They must be cheap to copy,
//! usable as lookup keys and serializable, so that a machine's whole
//! position can be saved and restored as a single value.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Copy`: States are plain values, passed around freely
/// - `Eq` + `Hash`: States key the entry-callback lookup
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable for persistence
///
/// # Example
///
/// ```rust
/// use permflow::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Open,
///     Closed,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(DoorState::Open.name(), "Open");
/// ```
pub trait State: Copy + Eq + Hash + Debug + Serialize + DeserializeOwned {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Trait for transient stimuli fed into a machine.
///
/// Events are never stored; they only select which table rows apply.
pub trait Event: Copy + PartialEq + Debug {
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
