//! `Warn`: record a warning and keep going.

use std::future::Future;

use attest_core::constraint::NotConstraint;
use attest_core::{AssertResult, CallSite, Message, ResolveConstraint};

use crate::context::TestExecutionContext;
use crate::engine::AssertionEngine;
use crate::policy::WarnPolicy;

const UNLESS: &str = "Warn::unless";
const WHEN: &str = "Warn::when";

/// Entry points for warnings.
///
/// A failed check records an `AssertionStatus::Warning` and returns `Ok(())`,
/// inside or outside a multiple-assert scope. Warnings count as assertions.
#[derive(Debug, Clone, Copy)]
pub struct Warn;

impl Warn {
    /// Warns unless `actual` satisfies the constraint.
    #[track_caller]
    pub fn unless<'m, T, C>(
        ctx: &TestExecutionContext,
        actual: &T,
        constraint: C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        T: ?Sized,
        C: ResolveConstraint<T>,
    {
        Self::unless_at(ctx, actual, constraint, message, CallSite::unknown())
    }

    #[track_caller]
    pub fn unless_at<'m, T, C>(
        ctx: &TestExecutionContext,
        actual: &T,
        constraint: C,
        message: impl Into<Message<'m>>,
        site: CallSite,
    ) -> AssertResult
    where
        T: ?Sized,
        C: ResolveConstraint<T>,
    {
        AssertionEngine::<WarnPolicy>::new(ctx, UNLESS).that(
            actual,
            constraint,
            message.into(),
            site.here(),
        )
    }

    /// Warns when `actual` satisfies the constraint.
    #[track_caller]
    pub fn when<'m, T, C>(
        ctx: &TestExecutionContext,
        actual: &T,
        constraint: C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        T: ?Sized,
        C: ResolveConstraint<T>,
    {
        Self::when_at(ctx, actual, constraint, message, CallSite::unknown())
    }

    #[track_caller]
    pub fn when_at<'m, T, C>(
        ctx: &TestExecutionContext,
        actual: &T,
        constraint: C,
        message: impl Into<Message<'m>>,
        site: CallSite,
    ) -> AssertResult
    where
        T: ?Sized,
        C: ResolveConstraint<T>,
    {
        let inverted = NotConstraint::new(constraint.resolve()?);
        AssertionEngine::<WarnPolicy>::new(ctx, WHEN).that(
            actual,
            inverted,
            message.into(),
            site.here(),
        )
    }

    #[track_caller]
    pub fn unless_delegate<'m, T, C, F>(
        ctx: &TestExecutionContext,
        delegate: F,
        constraint: C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: ResolveConstraint<T>,
        F: FnOnce() -> T,
    {
        let site = CallSite::unknown().here();
        AssertionEngine::<WarnPolicy>::new(ctx, UNLESS).that_delegate(
            delegate,
            constraint,
            message.into(),
            site,
        )
    }

    #[track_caller]
    pub fn unless_async<'a, T, C, F, Fut, M>(
        ctx: &'a TestExecutionContext,
        delegate: F,
        constraint: C,
        message: M,
    ) -> impl Future<Output = AssertResult> + 'a
    where
        T: 'a,
        C: ResolveConstraint<T> + 'a,
        F: FnOnce() -> Fut + 'a,
        Fut: Future<Output = T> + 'a,
        M: Into<Message<'a>> + 'a,
    {
        let site = CallSite::unknown().here();
        let message = message.into();
        async move {
            AssertionEngine::<WarnPolicy>::new(ctx, UNLESS)
                .that_async(delegate, constraint, message, site)
                .await
        }
    }
}
