//! Errors raised by the permission flow controller.

use crate::core::TransitionError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    /// An injected guard or callback failed mid-transition.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("Request result is missing its {0}")]
    MissingResult(&'static str),

    #[error("Permissions and grant results differ in length ({permissions} vs {grant_results})")]
    ResultLengthMismatch {
        permissions: usize,
        grant_results: usize,
    },
}
