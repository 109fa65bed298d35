//! Errors raised while evaluating guards and running actions.

use thiserror::Error;

/// Errors that can occur during a transition attempt.
///
/// These come from injected guards and actions; the machine never
/// produces them on its own and never swallows them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Guard evaluation failed: {0}")]
    GuardFailed(String),

    #[error("Transition action failed: {0}")]
    ActionFailed(String),
}
