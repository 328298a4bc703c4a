//! Equality and ordering constraints.

use std::cmp::Ordering;
use std::fmt::Debug;

use num_traits::{ToPrimitive, Zero};

use super::{Constraint, ConstraintResult, Describe};
use crate::message::format_value;
use crate::message::utils::{as_string_literal, unescape_literal};

/// Satisfied when the actual value equals the expected one.
///
/// String values that differ are reported with their lengths, the index of
/// the first difference and a caret under it. Lengths and the index count
/// characters of the raw strings, not of their escaped rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualConstraint<E> {
    expected: E,
}

impl<E> EqualConstraint<E> {
    pub fn new(expected: E) -> Self {
        Self { expected }
    }

    pub fn expected(&self) -> &E {
        &self.expected
    }
}

impl<E: Debug> Describe for EqualConstraint<E> {
    fn description(&self) -> String {
        format_value(&self.expected)
    }
}

impl<T, E> Constraint<T> for EqualConstraint<E>
where
    T: PartialEq<E> + Debug + ?Sized,
    E: Debug,
{
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let is_success = actual.eq(&self.expected);
        let actual_text = format_value(actual);
        if !is_success {
            let expected_text = self.description();
            if let (Some(expected), Some(actual)) = (
                as_string_literal(&expected_text).and_then(unescape_literal),
                as_string_literal(&actual_text).and_then(unescape_literal),
            ) {
                return ConstraintResult::string_difference(self, &expected, &actual, false);
            }
        }
        ConstraintResult::new(self, actual_text, is_success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl ComparisonOp {
    fn phrase(self) -> &'static str {
        match self {
            ComparisonOp::GreaterThan => "greater than",
            ComparisonOp::GreaterThanOrEqual => "greater than or equal to",
            ComparisonOp::LessThan => "less than",
            ComparisonOp::LessThanOrEqual => "less than or equal to",
        }
    }

    fn name(self) -> &'static str {
        match self {
            ComparisonOp::GreaterThan => "GreaterThan",
            ComparisonOp::GreaterThanOrEqual => "GreaterThanOrEqual",
            ComparisonOp::LessThan => "LessThan",
            ComparisonOp::LessThanOrEqual => "LessThanOrEqual",
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            ComparisonOp::GreaterThan => ordering == Ordering::Greater,
            ComparisonOp::GreaterThanOrEqual => ordering != Ordering::Less,
            ComparisonOp::LessThan => ordering == Ordering::Less,
            ComparisonOp::LessThanOrEqual => ordering != Ordering::Greater,
        }
    }
}

/// One ordered comparison against a fixed value.
///
/// Works for any pair of types with a `PartialOrd` relation. Incomparable
/// values (such as `NaN`) never satisfy it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConstraint<E> {
    expected: E,
    op: ComparisonOp,
}

impl<E> ComparisonConstraint<E> {
    pub fn new(op: ComparisonOp, expected: E) -> Self {
        Self { expected, op }
    }

    pub fn op(&self) -> ComparisonOp {
        self.op
    }
}

impl<E: Debug> Describe for ComparisonConstraint<E> {
    fn description(&self) -> String {
        format!("{} {}", self.op.phrase(), format_value(&self.expected))
    }

    fn display_name(&self) -> String {
        self.op.name().to_string()
    }
}

impl<T, E> Constraint<T> for ComparisonConstraint<E>
where
    T: PartialOrd<E> + Debug + ?Sized,
    E: Debug,
{
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let is_success = actual
            .partial_cmp(&self.expected)
            .is_some_and(|ordering| self.op.holds(ordering));
        ConstraintResult::new(self, format_value(actual), is_success)
    }
}

/// Satisfied by values within an inclusive range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeConstraint<E> {
    from: E,
    to: E,
}

impl<E> RangeConstraint<E> {
    pub fn new(from: E, to: E) -> Self {
        Self { from, to }
    }
}

impl<E: Debug> Describe for RangeConstraint<E> {
    fn description(&self) -> String {
        format!(
            "in range ({},{})",
            format_value(&self.from),
            format_value(&self.to)
        )
    }
}

impl<T, E> Constraint<T> for RangeConstraint<E>
where
    T: PartialOrd<E> + Debug + ?Sized,
    E: Debug,
{
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let above_lower = matches!(
            actual.partial_cmp(&self.from),
            Some(Ordering::Greater | Ordering::Equal)
        );
        let below_upper = matches!(
            actual.partial_cmp(&self.to),
            Some(Ordering::Less | Ordering::Equal)
        );
        ConstraintResult::new(self, format_value(actual), above_lower && below_upper)
    }
}

/// Satisfied by numbers within `tolerance` of `expected`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseToConstraint {
    expected: f64,
    tolerance: f64,
}

impl CloseToConstraint {
    pub fn new(expected: f64, tolerance: f64) -> Self {
        Self {
            expected,
            tolerance: tolerance.abs(),
        }
    }
}

impl Describe for CloseToConstraint {
    fn description(&self) -> String {
        format!("{:?} +/- {:?}", self.expected, self.tolerance)
    }
}

impl<T: ToPrimitive + Debug> Constraint<T> for CloseToConstraint {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let is_success = actual
            .to_f64()
            .is_some_and(|value| (value - self.expected).abs() <= self.tolerance);
        ConstraintResult::new(self, format_value(actual), is_success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Zero,
    Positive,
    Negative,
}

/// Compares a number with its type's zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolarityConstraint {
    polarity: Polarity,
}

impl PolarityConstraint {
    pub fn new(polarity: Polarity) -> Self {
        Self { polarity }
    }
}

impl Describe for PolarityConstraint {
    fn description(&self) -> String {
        match self.polarity {
            Polarity::Zero => "0".to_string(),
            Polarity::Positive => "greater than 0".to_string(),
            Polarity::Negative => "less than 0".to_string(),
        }
    }

    fn display_name(&self) -> String {
        format!("{:?}", self.polarity)
    }
}

impl<T: Zero + PartialOrd + Debug> Constraint<T> for PolarityConstraint {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let zero = T::zero();
        let is_success = match self.polarity {
            Polarity::Zero => actual.is_zero(),
            Polarity::Positive => *actual > zero,
            Polarity::Negative => *actual < zero,
        };
        ConstraintResult::new(self, format_value(actual), is_success)
    }
}

/// Satisfied when the actual value equals any of the candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct AnyOfConstraint<E> {
    candidates: Vec<E>,
}

impl<E> AnyOfConstraint<E> {
    pub fn new(candidates: Vec<E>) -> Self {
        Self { candidates }
    }
}

impl<E: Debug> Describe for AnyOfConstraint<E> {
    fn description(&self) -> String {
        let items: Vec<String> = self.candidates.iter().map(format_value).collect();
        format!("any of < {} >", items.join(", "))
    }
}

impl<T, E> Constraint<T> for AnyOfConstraint<E>
where
    T: PartialEq<E> + Debug + ?Sized,
    E: Debug,
{
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let is_success = self.candidates.iter().any(|candidate| actual.eq(candidate));
        ConstraintResult::new(self, format_value(actual), is_success)
    }
}

resolves_to_self!(
    [E,] EqualConstraint<E>,
    [E,] ComparisonConstraint<E>,
    [E,] RangeConstraint<E>,
    [] CloseToConstraint,
    [] PolarityConstraint,
    [E,] AnyOfConstraint<E>,
);
