//! Constraints on length and collection items.

use crate::constraint::{
    AllItemsConstraint, CollectionContainsConstraint, EqualConstraint, LengthConstraint,
    NoItemConstraint, SomeItemsConstraint,
};

pub fn length(expected: usize) -> LengthConstraint<EqualConstraint<usize>> {
    LengthConstraint::new(EqualConstraint::new(expected))
}

/// Applies `constraint` to the length, e.g. `has::length_that(is::greater_than(2))`.
pub fn length_that<C>(constraint: C) -> LengthConstraint<C> {
    LengthConstraint::new(constraint)
}

pub fn item<E>(expected: E) -> CollectionContainsConstraint<E> {
    CollectionContainsConstraint::new(expected)
}

pub fn all<C>(constraint: C) -> AllItemsConstraint<C> {
    AllItemsConstraint::new(constraint)
}

pub fn some<C>(constraint: C) -> SomeItemsConstraint<C> {
    SomeItemsConstraint::new(constraint)
}

pub fn none<C>(constraint: C) -> NoItemConstraint<C> {
    NoItemConstraint::new(constraint)
}
