//! `CollectionAssert` and `StringAssert`.

use std::fmt::Debug;

use attest_core::constraint::{Collection, Constraint, HasLength};
use attest_core::{does, has, is, AssertResult, Message};

use crate::assert::Assert;
use crate::context::TestExecutionContext;

/// Assertions about collections.
#[derive(Debug, Clone, Copy)]
pub struct CollectionAssert;

impl CollectionAssert {
    #[track_caller]
    pub fn contains<'m, C, E>(
        ctx: &TestExecutionContext,
        collection: &C,
        expected: E,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        Assert::that(ctx, collection, has::item(expected), message)
    }

    #[track_caller]
    pub fn does_not_contain<'m, C, E>(
        ctx: &TestExecutionContext,
        collection: &C,
        expected: E,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        Assert::that(ctx, collection, is::not(has::item(expected)), message)
    }

    #[track_caller]
    pub fn is_empty<'m, C>(
        ctx: &TestExecutionContext,
        collection: &C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: HasLength + Debug + ?Sized,
    {
        Assert::that(ctx, collection, is::empty(), message)
    }

    #[track_caller]
    pub fn is_not_empty<'m, C>(
        ctx: &TestExecutionContext,
        collection: &C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: HasLength + Debug + ?Sized,
    {
        Assert::that(ctx, collection, is::not(is::empty()), message)
    }

    #[track_caller]
    pub fn all_items_unique<'m, C>(
        ctx: &TestExecutionContext,
        collection: &C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialEq + Debug,
    {
        Assert::that(ctx, collection, is::unique(), message)
    }

    /// Ascending order.
    #[track_caller]
    pub fn is_ordered<'m, C>(
        ctx: &TestExecutionContext,
        collection: &C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialOrd + Debug,
    {
        Assert::that(ctx, collection, is::ordered(), message)
    }

    /// Same items in the same order.
    #[track_caller]
    pub fn are_equal<'m, C, E>(
        ctx: &TestExecutionContext,
        expected: impl IntoIterator<Item = E>,
        actual: &C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialEq<E> + Debug,
        E: Debug,
    {
        Assert::that(ctx, actual, is::sequence_equal_to(expected), message)
    }

    #[track_caller]
    pub fn are_not_equal<'m, C, E>(
        ctx: &TestExecutionContext,
        expected: impl IntoIterator<Item = E>,
        actual: &C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialEq<E> + Debug,
        E: Debug,
    {
        Assert::that(ctx, actual, is::not(is::sequence_equal_to(expected)), message)
    }

    /// Same items in any order.
    #[track_caller]
    pub fn are_equivalent<'m, C, E>(
        ctx: &TestExecutionContext,
        expected: impl IntoIterator<Item = E>,
        actual: &C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialEq<E> + Debug,
        E: Debug,
    {
        Assert::that(ctx, actual, is::equivalent_to(expected), message)
    }

    #[track_caller]
    pub fn are_not_equivalent<'m, C, E>(
        ctx: &TestExecutionContext,
        expected: impl IntoIterator<Item = E>,
        actual: &C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialEq<E> + Debug,
        E: Debug,
    {
        Assert::that(ctx, actual, is::not(is::equivalent_to(expected)), message)
    }

    #[track_caller]
    pub fn is_subset_of<'m, C, E>(
        ctx: &TestExecutionContext,
        subset: &C,
        superset: impl IntoIterator<Item = E>,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialEq<E> + Debug,
        E: Debug,
    {
        Assert::that(ctx, subset, is::subset_of(superset), message)
    }

    #[track_caller]
    pub fn is_not_subset_of<'m, C, E>(
        ctx: &TestExecutionContext,
        subset: &C,
        superset: impl IntoIterator<Item = E>,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialEq<E> + Debug,
        E: Debug,
    {
        Assert::that(ctx, subset, is::not(is::subset_of(superset)), message)
    }

    #[track_caller]
    pub fn is_superset_of<'m, C, E>(
        ctx: &TestExecutionContext,
        superset: &C,
        subset: impl IntoIterator<Item = E>,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialEq<E> + Debug,
        E: Debug,
    {
        Assert::that(ctx, superset, is::superset_of(subset), message)
    }

    #[track_caller]
    pub fn is_not_superset_of<'m, C, E>(
        ctx: &TestExecutionContext,
        superset: &C,
        subset: impl IntoIterator<Item = E>,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialEq<E> + Debug,
        E: Debug,
    {
        Assert::that(ctx, superset, is::not(is::superset_of(subset)), message)
    }

    /// Every item of a collection of options is `Some`.
    #[track_caller]
    pub fn all_items_are_some<'m, C, T>(
        ctx: &TestExecutionContext,
        collection: &C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection<Item = Option<T>> + Debug + ?Sized,
        T: Debug,
    {
        Assert::that(ctx, collection, has::all(is::some()), message)
    }

    #[track_caller]
    pub fn all_items_satisfy<'m, C, IC>(
        ctx: &TestExecutionContext,
        collection: &C,
        constraint: IC,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        IC: Constraint<C::Item>,
    {
        Assert::that(ctx, collection, has::all(constraint), message)
    }
}

/// Assertions about string contents. Arguments follow the
/// `(expected, actual)` order of the classic API.
#[derive(Debug, Clone, Copy)]
pub struct StringAssert;

impl StringAssert {
    #[track_caller]
    pub fn contains<'m, S>(
        ctx: &TestExecutionContext,
        expected: &str,
        actual: &S,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        S: AsRef<str> + ?Sized,
    {
        Assert::that(ctx, actual, does::contain(expected), message)
    }

    #[track_caller]
    pub fn does_not_contain<'m, S>(
        ctx: &TestExecutionContext,
        expected: &str,
        actual: &S,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        S: AsRef<str> + ?Sized,
    {
        Assert::that(ctx, actual, is::not(does::contain(expected)), message)
    }

    #[track_caller]
    pub fn starts_with<'m, S>(
        ctx: &TestExecutionContext,
        expected: &str,
        actual: &S,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        S: AsRef<str> + ?Sized,
    {
        Assert::that(ctx, actual, does::start_with(expected), message)
    }

    #[track_caller]
    pub fn ends_with<'m, S>(
        ctx: &TestExecutionContext,
        expected: &str,
        actual: &S,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        S: AsRef<str> + ?Sized,
    {
        Assert::that(ctx, actual, does::end_with(expected), message)
    }

    #[track_caller]
    pub fn does_not_start_with<'m, S>(
        ctx: &TestExecutionContext,
        expected: &str,
        actual: &S,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        S: AsRef<str> + ?Sized,
    {
        Assert::that(ctx, actual, is::not(does::start_with(expected)), message)
    }

    #[track_caller]
    pub fn does_not_end_with<'m, S>(
        ctx: &TestExecutionContext,
        expected: &str,
        actual: &S,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        S: AsRef<str> + ?Sized,
    {
        Assert::that(ctx, actual, is::not(does::end_with(expected)), message)
    }

    /// An invalid pattern is `InvalidArgument` and is not counted.
    #[track_caller]
    pub fn is_match<'m, S>(
        ctx: &TestExecutionContext,
        pattern: &str,
        actual: &S,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        S: AsRef<str> + ?Sized,
    {
        Assert::that(ctx, actual, does::match_regex(pattern)?, message)
    }

    #[track_caller]
    pub fn does_not_match<'m, S>(
        ctx: &TestExecutionContext,
        pattern: &str,
        actual: &S,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        S: AsRef<str> + ?Sized,
    {
        Assert::that(ctx, actual, is::not(does::match_regex(pattern)?), message)
    }

    #[track_caller]
    pub fn are_equal_ignoring_case<'m, S>(
        ctx: &TestExecutionContext,
        expected: &str,
        actual: &S,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        S: AsRef<str> + ?Sized,
    {
        Assert::that(ctx, actual, is::equal_ignoring_case(expected), message)
    }

    #[track_caller]
    pub fn are_not_equal_ignoring_case<'m, S>(
        ctx: &TestExecutionContext,
        expected: &str,
        actual: &S,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        S: AsRef<str> + ?Sized,
    {
        Assert::that(ctx, actual, is::not(is::equal_ignoring_case(expected)), message)
    }
}
