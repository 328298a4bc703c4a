//! Logical combinations of constraints.

use super::{Constraint, ConstraintResult, Describe};

/// Inverts another constraint.
#[derive(Debug, Clone)]
pub struct NotConstraint<C> {
    inner: C,
}

impl<C> NotConstraint<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Describe> Describe for NotConstraint<C> {
    fn description(&self) -> String {
        format!("not {}", self.inner.description())
    }
}

impl<T: ?Sized, C: Constraint<T>> Constraint<T> for NotConstraint<C> {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let inner = self.inner.apply_to(actual);
        ConstraintResult::new(self, inner.actual().to_string(), !inner.is_success())
    }
}

/// Satisfied when both constraints are.
#[derive(Debug, Clone)]
pub struct AndConstraint<A, B> {
    left: A,
    right: B,
}

impl<A, B> AndConstraint<A, B> {
    pub fn new(left: A, right: B) -> Self {
        Self { left, right }
    }
}

impl<A: Describe, B: Describe> Describe for AndConstraint<A, B> {
    fn description(&self) -> String {
        format!("{} and {}", self.left.description(), self.right.description())
    }
}

impl<T, A, B> Constraint<T> for AndConstraint<A, B>
where
    T: ?Sized,
    A: Constraint<T>,
    B: Constraint<T>,
{
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let left = self.left.apply_to(actual);
        if !left.is_success() {
            return ConstraintResult::new(self, left.actual().to_string(), false);
        }
        let right = self.right.apply_to(actual);
        ConstraintResult::new(self, right.actual().to_string(), right.is_success())
    }
}

/// Satisfied when either constraint is.
#[derive(Debug, Clone)]
pub struct OrConstraint<A, B> {
    left: A,
    right: B,
}

impl<A, B> OrConstraint<A, B> {
    pub fn new(left: A, right: B) -> Self {
        Self { left, right }
    }
}

impl<A: Describe, B: Describe> Describe for OrConstraint<A, B> {
    fn description(&self) -> String {
        format!("{} or {}", self.left.description(), self.right.description())
    }
}

impl<T, A, B> Constraint<T> for OrConstraint<A, B>
where
    T: ?Sized,
    A: Constraint<T>,
    B: Constraint<T>,
{
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let left = self.left.apply_to(actual);
        if left.is_success() {
            return ConstraintResult::new(self, left.actual().to_string(), true);
        }
        let right = self.right.apply_to(actual);
        ConstraintResult::new(self, right.actual().to_string(), right.is_success())
    }
}

resolves_to_self!(
    [C,] NotConstraint<C>,
    [A, B,] AndConstraint<A, B>,
    [A, B,] OrConstraint<A, B>,
);
