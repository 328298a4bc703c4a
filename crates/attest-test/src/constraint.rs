//! Instrumented constraints.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use attest_core::{AssertResult, Constraint, ConstraintResult, Describe, ResolveConstraint};

/// Wraps a constraint and counts resolutions and applications.
///
/// Clones share the counters, so a test can keep one clone and hand the
/// other to an assertion.
#[derive(Debug, Clone)]
pub struct CountingConstraint<C> {
    inner: C,
    resolved: Arc<AtomicUsize>,
    applied: Arc<AtomicUsize>,
}

impl<C> CountingConstraint<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            resolved: Arc::new(AtomicUsize::new(0)),
            applied: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn resolved(&self) -> usize {
        self.resolved.load(Ordering::SeqCst)
    }

    pub fn applied(&self) -> usize {
        self.applied.load(Ordering::SeqCst)
    }
}

impl<C: Describe> Describe for CountingConstraint<C> {
    fn description(&self) -> String {
        self.inner.description()
    }

    fn display_name(&self) -> String {
        self.inner.display_name()
    }
}

impl<T: ?Sized, C: Constraint<T>> Constraint<T> for CountingConstraint<C> {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        self.applied.fetch_add(1, Ordering::SeqCst);
        self.inner.apply_to(actual)
    }
}

impl<T: ?Sized, C: Constraint<T>> ResolveConstraint<T> for CountingConstraint<C> {
    type Resolved = Self;

    fn resolve(self) -> AssertResult<Self> {
        self.resolved.fetch_add(1, Ordering::SeqCst);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_core::is;

    #[test]
    fn test_counts_applications_across_clones() {
        let counter = CountingConstraint::new(is::greater_than(3));
        let handle = counter.clone();

        let resolved = ResolveConstraint::<i32>::resolve(counter).unwrap();
        assert!(resolved.apply_to(&5i32).is_success());
        assert!(!resolved.apply_to(&1i32).is_success());

        assert_eq!(handle.resolved(), 1);
        assert_eq!(handle.applied(), 2);
    }

    #[test]
    fn test_describes_as_inner() {
        let counter = CountingConstraint::new(is::greater_than(3));
        assert_eq!(counter.description(), "greater than 3");
        assert_eq!(counter.display_name(), "GreaterThan");
    }
}
