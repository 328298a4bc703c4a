//! Constraints: reusable predicates that describe their expectation.
//!
//! A constraint is built once (usually through the `is`, `has`, `does` and
//! `throws` modules), resolved, then applied to an actual value to produce a
//! [`ConstraintResult`]. Mismatches never surface as errors here; they live
//! in the result and the caller decides what a failure means.

use std::any::type_name;
use std::future::Future;

use crate::error::AssertResult;

/// Implements [`ResolveConstraint`] as the identity for a concrete constraint.
///
/// Generic parameters are written first, with a trailing comma:
/// ```ignore
/// resolves_to_self!([] TrueConstraint);
/// resolves_to_self!([E,] EqualConstraint<E>);
/// ```
macro_rules! resolves_to_self {
    ($( [$($generics:tt)*] $ty:ty ),+ $(,)?) => {
        $(
            impl<$($generics)* __Actual: ?Sized>
                $crate::constraint::ResolveConstraint<__Actual> for $ty
            where
                $ty: $crate::constraint::Constraint<__Actual>,
            {
                type Resolved = Self;

                fn resolve(self) -> $crate::error::AssertResult<Self> {
                    Ok(self)
                }
            }
        )+
    };
}

mod basic;
mod collection;
mod comparison;
mod compound;
mod expression;
mod path;
mod result;
mod string;
mod throws;

#[cfg(test)]
mod tests;

pub use basic::{
    ErrConstraint, FalseConstraint, NoneConstraint, OkConstraint, PredicateConstraint,
    SameAsConstraint, SomeConstraint, TrueConstraint,
};
pub use collection::{
    AllItemsConstraint, Collection, CollectionContainsConstraint, EmptyConstraint,
    EquivalentConstraint, HasLength, LengthConstraint, NoItemConstraint, OrderedConstraint,
    SequenceEqualConstraint, SomeItemsConstraint, SubsetConstraint, SupersetConstraint,
    UniqueItemsConstraint,
};
pub use comparison::{
    AnyOfConstraint, CloseToConstraint, ComparisonConstraint, ComparisonOp, EqualConstraint,
    Polarity, PolarityConstraint, RangeConstraint,
};
pub use compound::{AndConstraint, NotConstraint, OrConstraint};
pub use expression::ConstraintExpression;
pub use path::{DirectoryEmptyConstraint, DirectoryExistsConstraint, FileExistsConstraint};
pub use result::{ConstraintResult, ConstraintStatus};
pub use string::{
    EqualIgnoringCaseConstraint, RegexConstraint, SubstringConstraint, SubstringMode,
};
pub use throws::{panic_message, DelegateOutput, Invocation, Thrown, ThrowsConstraint, ThrowsKind};

/// The human-readable side of a constraint.
///
/// Kept apart from [`Constraint`] so a constraint that applies to many actual
/// types still has exactly one description.
pub trait Describe {
    /// The expectation, as shown after `Expected:`.
    fn description(&self) -> String;

    /// Short name of the constraint kind, e.g. `Equal` or `GreaterThan`.
    fn display_name(&self) -> String {
        short_type_name(type_name::<Self>())
    }
}

/// Evaluates an actual value of type `T`.
pub trait Constraint<T: ?Sized>: Describe {
    fn apply_to(&self, actual: &T) -> ConstraintResult;
}

/// Awaits `actual` and applies `constraint` to the produced value.
pub async fn apply_to_async<T, C, F>(constraint: &C, actual: F) -> ConstraintResult
where
    C: Constraint<T> + ?Sized,
    F: Future<Output = T>,
{
    let value = actual.await;
    constraint.apply_to(&value)
}

/// Turns a constraint-shaped value into an evaluable constraint.
///
/// Concrete constraints resolve to themselves; a [`ConstraintExpression`]
/// resolves to the tree its operators describe, or fails when the expression
/// is incomplete.
pub trait ResolveConstraint<T: ?Sized> {
    type Resolved: Constraint<T>;

    fn resolve(self) -> AssertResult<Self::Resolved>;
}

impl<C: Describe + ?Sized> Describe for Box<C> {
    fn description(&self) -> String {
        (**self).description()
    }

    fn display_name(&self) -> String {
        (**self).display_name()
    }
}

impl<T: ?Sized, C: Constraint<T> + ?Sized> Constraint<T> for Box<C> {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        (**self).apply_to(actual)
    }
}

impl<T: ?Sized, C: Constraint<T> + ?Sized> ResolveConstraint<T> for Box<C> {
    type Resolved = Self;

    fn resolve(self) -> AssertResult<Self> {
        Ok(self)
    }
}

impl<C: Describe + ?Sized> Describe for &C {
    fn description(&self) -> String {
        (**self).description()
    }

    fn display_name(&self) -> String {
        (**self).display_name()
    }
}

impl<T: ?Sized, C: Constraint<T> + ?Sized> Constraint<T> for &C {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        (**self).apply_to(actual)
    }
}

resolves_to_self!(['c, C: ?Sized,] &'c C);

/// Combinators available on every constraint.
pub trait ConstraintExt: Describe + Sized {
    fn and<B: Describe>(self, other: B) -> AndConstraint<Self, B> {
        AndConstraint::new(self, other)
    }

    fn or<B: Describe>(self, other: B) -> OrConstraint<Self, B> {
        OrConstraint::new(self, other)
    }

    fn not(self) -> NotConstraint<Self> {
        NotConstraint::new(self)
    }

    fn boxed<T: ?Sized>(self) -> Box<dyn Constraint<T>>
    where
        Self: Constraint<T> + 'static,
    {
        Box::new(self)
    }
}

impl<D: Describe> ConstraintExt for D {}

/// `attest_core::constraint::comparison::EqualConstraint<i32>` -> `Equal`
pub(crate) fn short_type_name(full: &str) -> String {
    let without_generics = full.split('<').next().unwrap_or(full);
    let last = without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
        .trim_start_matches('&');
    last.strip_suffix("Constraint").unwrap_or(last).to_string()
}
