//! Build errors for machine and permission flow builders.

use crate::core::TransitionError;
use thiserror::Error;

/// Errors that can occur when building machines and permission flows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Add at least one row")]
    NoTransitions,

    #[error("Only one host may be supplied: activity or fragment, not both")]
    ConflictingHosts,

    #[error("No activity or fragment host supplied and `{0}` override is missing")]
    MissingOverride(&'static str),

    #[error("Invalid configuration: {}", join(.0))]
    Invalid(Vec<BuildError>),

    #[error("Initial state could not be computed: {0}")]
    Start(#[from] TransitionError),
}

impl BuildError {
    /// Flatten into the list of individual problems.
    pub fn problems(&self) -> Vec<&BuildError> {
        match self {
            Self::Invalid(errors) => errors.iter().collect(),
            other => vec![other],
        }
    }
}

fn join(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_problem() {
        let error = BuildError::Invalid(vec![
            BuildError::MissingOverride("on_request"),
            BuildError::MissingOverride("can_show_rationale"),
        ]);

        let message = error.to_string();
        assert!(message.contains("`on_request`"));
        assert!(message.contains("`can_show_rationale`"));
        assert_eq!(error.problems().len(), 2);
    }

    #[test]
    fn single_problem_flattens_to_itself() {
        let error = BuildError::ConflictingHosts;
        assert_eq!(error.problems(), vec![&BuildError::ConflictingHosts]);
    }
}
