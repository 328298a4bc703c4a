//! State and comparison constraints: `is::equal_to(5)`, `is::none()`, ...

use std::fmt::Debug;

use crate::constraint::{
    AnyOfConstraint, CloseToConstraint, ComparisonConstraint, ComparisonOp,
    DirectoryEmptyConstraint, DirectoryExistsConstraint, EmptyConstraint, EqualConstraint,
    EqualIgnoringCaseConstraint, EquivalentConstraint, ErrConstraint, FalseConstraint,
    FileExistsConstraint, NoneConstraint, NotConstraint, OkConstraint, OrderedConstraint,
    Polarity, PolarityConstraint, PredicateConstraint, RangeConstraint, SameAsConstraint,
    SequenceEqualConstraint, SomeConstraint, SubsetConstraint, SupersetConstraint,
    TrueConstraint, UniqueItemsConstraint,
};

pub fn true_() -> TrueConstraint {
    TrueConstraint
}

pub fn false_() -> FalseConstraint {
    FalseConstraint
}

pub fn none() -> NoneConstraint {
    NoneConstraint
}

pub fn some() -> SomeConstraint {
    SomeConstraint
}

pub fn ok() -> OkConstraint {
    OkConstraint
}

pub fn err() -> ErrConstraint {
    ErrConstraint
}

pub fn equal_to<E>(expected: E) -> EqualConstraint<E> {
    EqualConstraint::new(expected)
}

pub fn not_equal_to<E>(expected: E) -> NotConstraint<EqualConstraint<E>> {
    NotConstraint::new(EqualConstraint::new(expected))
}

/// Case-insensitive string equality.
pub fn equal_ignoring_case(expected: impl Into<String>) -> EqualIgnoringCaseConstraint {
    EqualIgnoringCaseConstraint::new(expected)
}

pub fn greater_than<E>(expected: E) -> ComparisonConstraint<E> {
    ComparisonConstraint::new(ComparisonOp::GreaterThan, expected)
}

pub fn at_least<E>(expected: E) -> ComparisonConstraint<E> {
    ComparisonConstraint::new(ComparisonOp::GreaterThanOrEqual, expected)
}

pub fn less_than<E>(expected: E) -> ComparisonConstraint<E> {
    ComparisonConstraint::new(ComparisonOp::LessThan, expected)
}

pub fn at_most<E>(expected: E) -> ComparisonConstraint<E> {
    ComparisonConstraint::new(ComparisonOp::LessThanOrEqual, expected)
}

/// Inclusive on both ends.
pub fn in_range<E>(from: E, to: E) -> RangeConstraint<E> {
    RangeConstraint::new(from, to)
}

pub fn close_to(expected: f64, tolerance: f64) -> CloseToConstraint {
    CloseToConstraint::new(expected, tolerance)
}

pub fn zero() -> PolarityConstraint {
    PolarityConstraint::new(Polarity::Zero)
}

pub fn positive() -> PolarityConstraint {
    PolarityConstraint::new(Polarity::Positive)
}

pub fn negative() -> PolarityConstraint {
    PolarityConstraint::new(Polarity::Negative)
}

pub fn any_of<E>(candidates: impl IntoIterator<Item = E>) -> AnyOfConstraint<E> {
    AnyOfConstraint::new(candidates.into_iter().collect())
}

pub fn same_as<E: Debug + ?Sized>(expected: &E) -> SameAsConstraint<'_, E> {
    SameAsConstraint::new(expected)
}

pub fn empty() -> EmptyConstraint {
    EmptyConstraint
}

pub fn unique() -> UniqueItemsConstraint {
    UniqueItemsConstraint
}

/// Same items in the same order.
pub fn sequence_equal_to<E>(expected: impl IntoIterator<Item = E>) -> SequenceEqualConstraint<E> {
    SequenceEqualConstraint::new(expected.into_iter().collect())
}

/// Same items in any order; duplicates must match in number.
pub fn equivalent_to<E>(expected: impl IntoIterator<Item = E>) -> EquivalentConstraint<E> {
    EquivalentConstraint::new(expected.into_iter().collect())
}

pub fn subset_of<E>(expected: impl IntoIterator<Item = E>) -> SubsetConstraint<E> {
    SubsetConstraint::new(expected.into_iter().collect())
}

pub fn superset_of<E>(expected: impl IntoIterator<Item = E>) -> SupersetConstraint<E> {
    SupersetConstraint::new(expected.into_iter().collect())
}

/// Ascending order; call `.descending()` to reverse.
pub fn ordered() -> OrderedConstraint {
    OrderedConstraint::new()
}

pub fn matching<F>(predicate: F, description: impl Into<String>) -> PredicateConstraint<F> {
    PredicateConstraint::new(predicate, description)
}

pub fn not<C>(constraint: C) -> NotConstraint<C> {
    NotConstraint::new(constraint)
}

pub fn existing_file() -> FileExistsConstraint {
    FileExistsConstraint
}

pub fn existing_directory() -> DirectoryExistsConstraint {
    DirectoryExistsConstraint
}

pub fn empty_directory() -> DirectoryEmptyConstraint {
    DirectoryEmptyConstraint
}
