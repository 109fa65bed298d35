//! Guard predicates for controlling state transitions.
//!
//! Guards are zero-argument boolean functions evaluated fresh every time a
//! transition is attempted. They usually read external, changing facts
//! (is a permission granted right now?), so their results are never cached.

use super::error::TransitionError;
use std::fmt;
use std::ops::{BitAnd, Not};
use std::rc::Rc;

type Predicate = Rc<dyn Fn() -> Result<bool, TransitionError>>;

/// Predicate that determines if a transition row can fire.
///
/// Guards are cheap to clone; clones share the same underlying predicate,
/// which lets one guard appear in several rows and combinators.
///
/// # Example
///
/// ```rust
/// use permflow::core::Guard;
///
/// let granted = Guard::new(|| false);
/// let rationale = Guard::new(|| true);
///
/// let ask_with_rationale = !granted.clone() & rationale;
/// assert!(ask_with_rationale.check().unwrap());
/// assert!(!granted.check().unwrap());
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Predicate,
}

impl Guard {
    /// Create a guard from an infallible predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Guard {
            predicate: Rc::new(move || Ok(predicate())),
        }
    }

    /// Create a guard whose evaluation may fail.
    ///
    /// A failure is never treated as `false`; it aborts the transition
    /// attempt and surfaces to the caller.
    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn() -> Result<bool, TransitionError> + 'static,
    {
        Guard {
            predicate: Rc::new(predicate),
        }
    }

    /// Guard that always passes.
    pub fn always() -> Self {
        Guard::new(|| true)
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> Result<bool, TransitionError> {
        (self.predicate)()
    }

    /// Logical AND, short-circuiting on the first `false` operand.
    pub fn and(&self, other: &Guard) -> Guard {
        Guard::all([self.clone(), other.clone()])
    }

    /// Logical NOT.
    pub fn negate(&self) -> Guard {
        let inner = self.clone();
        Guard::fallible(move || inner.check().map(|v| !v))
    }

    /// Conjunction of every guard, evaluated in order.
    ///
    /// Evaluation stops at the first operand that is `false` or fails.
    /// An empty conjunction passes.
    pub fn all<I>(guards: I) -> Guard
    where
        I: IntoIterator<Item = Guard>,
    {
        let guards: Vec<Guard> = guards.into_iter().collect();
        Guard::fallible(move || {
            for guard in &guards {
                if !guard.check()? {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }
}

impl Not for Guard {
    type Output = Guard;

    fn not(self) -> Guard {
        self.negate()
    }
}

impl BitAnd for Guard {
    type Output = Guard;

    fn bitand(self, rhs: Guard) -> Guard {
        self.and(&rhs)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn guard_reflects_predicate() {
        assert!(Guard::new(|| true).check().unwrap());
        assert!(!Guard::new(|| false).check().unwrap());
        assert!(Guard::always().check().unwrap());
    }

    #[test]
    fn guard_is_evaluated_fresh_each_time() {
        let flag = Rc::new(Cell::new(false));
        let reader = Rc::clone(&flag);
        let guard = Guard::new(move || reader.get());

        assert!(!guard.check().unwrap());
        flag.set(true);
        assert!(guard.check().unwrap());
    }

    #[test]
    fn not_inverts() {
        assert!((!Guard::new(|| false)).check().unwrap());
        assert!(!(!Guard::new(|| true)).check().unwrap());
    }

    #[test]
    fn and_truth_table() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let guard = Guard::new(move || a) & Guard::new(move || b);
            assert_eq!(guard.check().unwrap(), a && b);
        }
    }

    #[test]
    fn and_short_circuits() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let rhs = Guard::new(move || {
            counter.set(counter.get() + 1);
            true
        });

        let guard = Guard::new(|| false) & rhs;
        assert!(!guard.check().unwrap());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn failure_propagates_through_combinators() {
        let failing = Guard::fallible(|| Err(TransitionError::GuardFailed("boom".into())));

        assert!((!failing.clone()).check().is_err());
        assert!((Guard::always() & failing.clone()).check().is_err());
        // Short-circuit skips the failing operand entirely.
        assert!(!(Guard::new(|| false) & failing).check().unwrap());
    }

    #[test]
    fn empty_conjunction_passes() {
        assert!(Guard::all(Vec::new()).check().unwrap());
    }
}
