//! Boolean, option, result, predicate and identity constraints.

use std::fmt::{self, Debug};

use super::{Constraint, ConstraintResult, Describe};
use crate::message::format_value;

/// Satisfied by `true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrueConstraint;

impl Describe for TrueConstraint {
    fn description(&self) -> String {
        "True".to_string()
    }
}

impl Constraint<bool> for TrueConstraint {
    fn apply_to(&self, actual: &bool) -> ConstraintResult {
        ConstraintResult::new(self, format_value(actual), *actual)
    }
}

/// Satisfied by `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FalseConstraint;

impl Describe for FalseConstraint {
    fn description(&self) -> String {
        "False".to_string()
    }
}

impl Constraint<bool> for FalseConstraint {
    fn apply_to(&self, actual: &bool) -> ConstraintResult {
        ConstraintResult::new(self, format_value(actual), !*actual)
    }
}

/// Satisfied by `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneConstraint;

impl Describe for NoneConstraint {
    fn description(&self) -> String {
        "None".to_string()
    }
}

impl<T: Debug> Constraint<Option<T>> for NoneConstraint {
    fn apply_to(&self, actual: &Option<T>) -> ConstraintResult {
        ConstraintResult::new(self, format_value(actual), actual.is_none())
    }
}

/// Satisfied by any `Some` value.
#[derive(Debug, Clone, Copy, Default)]
pub struct SomeConstraint;

impl Describe for SomeConstraint {
    fn description(&self) -> String {
        "Some(_)".to_string()
    }
}

impl<T: Debug> Constraint<Option<T>> for SomeConstraint {
    fn apply_to(&self, actual: &Option<T>) -> ConstraintResult {
        ConstraintResult::new(self, format_value(actual), actual.is_some())
    }
}

/// Satisfied by any `Ok` value.
#[derive(Debug, Clone, Copy, Default)]
pub struct OkConstraint;

impl Describe for OkConstraint {
    fn description(&self) -> String {
        "Ok(_)".to_string()
    }
}

impl<T: Debug, E: Debug> Constraint<Result<T, E>> for OkConstraint {
    fn apply_to(&self, actual: &Result<T, E>) -> ConstraintResult {
        ConstraintResult::new(self, format_value(actual), actual.is_ok())
    }
}

/// Satisfied by any `Err` value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrConstraint;

impl Describe for ErrConstraint {
    fn description(&self) -> String {
        "Err(_)".to_string()
    }
}

impl<T: Debug, E: Debug> Constraint<Result<T, E>> for ErrConstraint {
    fn apply_to(&self, actual: &Result<T, E>) -> ConstraintResult {
        ConstraintResult::new(self, format_value(actual), actual.is_err())
    }
}

/// Satisfied when a user predicate returns true.
#[derive(Clone)]
pub struct PredicateConstraint<F> {
    predicate: F,
    description: String,
}

impl<F> PredicateConstraint<F> {
    pub fn new(predicate: F, description: impl Into<String>) -> Self {
        Self {
            predicate,
            description: description.into(),
        }
    }
}

impl<F> Debug for PredicateConstraint<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateConstraint")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<F> Describe for PredicateConstraint<F> {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn display_name(&self) -> String {
        "Predicate".to_string()
    }
}

impl<T, F> Constraint<T> for PredicateConstraint<F>
where
    T: Debug + ?Sized,
    F: Fn(&T) -> bool,
{
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        ConstraintResult::new(self, format_value(actual), (self.predicate)(actual))
    }
}

/// Satisfied only by the very same object (pointer identity).
#[derive(Debug, Clone, Copy)]
pub struct SameAsConstraint<'a, E: ?Sized> {
    expected: &'a E,
}

impl<'a, E: ?Sized> SameAsConstraint<'a, E> {
    pub fn new(expected: &'a E) -> Self {
        Self { expected }
    }
}

impl<E: Debug + ?Sized> Describe for SameAsConstraint<'_, E> {
    fn description(&self) -> String {
        format!("same as {}", format_value(self.expected))
    }

    fn display_name(&self) -> String {
        "SameAs".to_string()
    }
}

impl<T: Debug + ?Sized> Constraint<T> for SameAsConstraint<'_, T> {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        ConstraintResult::new(self, format_value(actual), std::ptr::eq(actual, self.expected))
    }
}

resolves_to_self!(
    [] TrueConstraint,
    [] FalseConstraint,
    [] NoneConstraint,
    [] SomeConstraint,
    [] OkConstraint,
    [] ErrConstraint,
    [F,] PredicateConstraint<F>,
    ['a, E: ?Sized,] SameAsConstraint<'a, E>,
);
