//! Side-effecting callbacks run on entry to a state or on a specific transition.

use super::error::TransitionError;
use std::fmt;
use std::rc::Rc;

type Callback = Rc<dyn Fn() -> Result<(), TransitionError>>;

/// Zero-argument callback attached to a state entry or a state pair.
///
/// Like [`Guard`](super::Guard), clones share the same callback, so one
/// action can be registered for several transitions.
#[derive(Clone)]
pub struct Action {
    callback: Callback,
}

impl Action {
    /// Create an action from an infallible closure.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        Action {
            callback: Rc::new(move || {
                callback();
                Ok(())
            }),
        }
    }

    /// Create an action that may fail.
    pub fn fallible<F>(callback: F) -> Self
    where
        F: Fn() -> Result<(), TransitionError> + 'static,
    {
        Action {
            callback: Rc::new(callback),
        }
    }

    /// Run the callback.
    pub fn run(&self) -> Result<(), TransitionError> {
        (self.callback)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn action_runs_callback() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let action = Action::new(move || counter.set(counter.get() + 1));

        action.run().unwrap();
        action.clone().run().unwrap();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn fallible_action_reports_error() {
        let action = Action::fallible(|| Err(TransitionError::ActionFailed("nope".into())));
        assert_eq!(
            action.run(),
            Err(TransitionError::ActionFailed("nope".into()))
        );
    }
}
