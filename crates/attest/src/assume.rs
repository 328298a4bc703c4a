//! `Assume`: preconditions that make a test inconclusive instead of failing it.

use attest_core::{is, AssertResult, CallSite, Message, ResolveConstraint};

use crate::context::TestExecutionContext;
use crate::engine::AssertionEngine;
use crate::policy::AssumePolicy;

const THAT: &str = "Assume::that";

/// Entry points for assumptions.
///
/// An unmet assumption returns `Err(AssertionError::Inconclusive)`.
/// Assumptions are not counted as assertions and may not be made inside a
/// multiple-assert scope.
#[derive(Debug, Clone, Copy)]
pub struct Assume;

impl Assume {
    fn engine(ctx: &TestExecutionContext) -> AssertionEngine<'_, AssumePolicy> {
        AssertionEngine::new(ctx, THAT)
    }

    #[track_caller]
    pub fn that<'m, T, C>(
        ctx: &TestExecutionContext,
        actual: &T,
        constraint: C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        T: ?Sized,
        C: ResolveConstraint<T>,
    {
        Self::that_at(ctx, actual, constraint, message, CallSite::unknown())
    }

    #[track_caller]
    pub fn that_at<'m, T, C>(
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
        Self::engine(ctx).that(actual, constraint, message.into(), site.here())
    }

    #[track_caller]
    pub fn that_delegate<'m, T, C, F>(
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
        Self::engine(ctx).that_delegate(delegate, constraint, message.into(), site)
    }

    #[track_caller]
    pub fn is_true<'m>(
        ctx: &TestExecutionContext,
        condition: bool,
        message: impl Into<Message<'m>>,
    ) -> AssertResult {
        Self::that(ctx, &condition, is::true_(), message)
    }
}
