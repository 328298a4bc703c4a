//! `Assert`: fail now, or queue inside a multiple-assert scope.

use std::fmt::Debug;
use std::future::Future;

use attest_core::constraint::{Collection, HasLength};
use attest_core::{
    has, is, throws, AssertResult, AssertionError, CallSite, DelegateOutput, Invocation, Message,
    ResolveConstraint,
};

use crate::context::TestExecutionContext;
use crate::engine::AssertionEngine;
use crate::policy::{AssertPolicy, FailurePolicy, WarnPolicy};
use crate::retry::{RetryEvaluator, RetryOptions};
use crate::scope::ScopeExit;

const THAT: &str = "Assert::that";

/// Entry points that fail the test.
///
/// Outside a multiple-assert scope a failed constraint returns
/// `Err(AssertionError::Failed)`. Inside one the failure is recorded, `Ok(())`
/// is returned and all failures are raised together when the outermost scope
/// ends.
///
/// ```ignore
/// Assert::that(&ctx, &total, is::greater_than(10), ())?;
/// Assert::that(&ctx, &names, has::length(3), "three names expected")?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Assert;

impl Assert {
    fn engine(ctx: &TestExecutionContext) -> AssertionEngine<'_, AssertPolicy> {
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

    /// [`that`](Self::that) with the call-site text captured by `assert_that!`.
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

    /// Same failure path and message as `that(&condition, is::true_())`.
    #[track_caller]
    pub fn is_true<'m>(
        ctx: &TestExecutionContext,
        condition: bool,
        message: impl Into<Message<'m>>,
    ) -> AssertResult {
        Self::that(ctx, &condition, is::true_(), message)
    }

    #[track_caller]
    pub fn is_false<'m>(
        ctx: &TestExecutionContext,
        condition: bool,
        message: impl Into<Message<'m>>,
    ) -> AssertResult {
        Self::that(ctx, &condition, is::false_(), message)
    }

    /// Evaluates `condition` lazily; fails like [`is_true`](Self::is_true).
    #[track_caller]
    pub fn condition<'m, F>(
        ctx: &TestExecutionContext,
        condition: F,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        F: FnOnce() -> bool,
    {
        Self::that_delegate(ctx, condition, is::true_(), message)
    }

    /// Applies the constraint to the value produced by `delegate`.
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

    /// Runs `code` and applies a `throws::*` constraint to how it ended.
    ///
    /// Code returning a spawned thread handle or a boxed future is rejected
    /// with `InvalidArgument` before it runs; use
    /// [`that_async`](Self::that_async) for asynchronous code.
    #[track_caller]
    pub fn that_code<'m, R, C, F>(
        ctx: &TestExecutionContext,
        code: F,
        constraint: C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        R: DelegateOutput,
        C: ResolveConstraint<Invocation<R>>,
        F: FnOnce() -> R,
    {
        let site = CallSite::unknown().here();
        Self::engine(ctx).that_code(code, constraint, message.into(), site)
    }

    /// Awaits `delegate()` and applies the constraint to its output.
    #[track_caller]
    pub fn that_async<'a, T, C, F, Fut, M>(
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
            Self::engine(ctx)
                .that_async(delegate, constraint, message, site)
                .await
        }
    }

    /// Polls `provider` until the constraint passes or `options.timeout` elapses.
    ///
    /// Counts as one assertion however many attempts are made.
    #[track_caller]
    pub fn retry<'m, T, C, F>(
        ctx: &TestExecutionContext,
        provider: F,
        constraint: C,
        options: RetryOptions,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: ResolveConstraint<T>,
        F: FnMut() -> T,
    {
        RetryEvaluator::new(Self::engine(ctx), options).run(
            provider,
            constraint,
            message.into(),
            CallSite::unknown().here(),
        )
    }

    /// [`retry`](Self::retry) using the context's configured retry timing.
    #[track_caller]
    pub fn eventually<'m, T, C, F>(
        ctx: &TestExecutionContext,
        provider: F,
        constraint: C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: ResolveConstraint<T>,
        F: FnMut() -> T,
    {
        let options = RetryOptions::from_config(&ctx.config().retry);
        Self::retry(ctx, provider, constraint, options, message)
    }

    /// Async form of [`retry`](Self::retry); sleeps without blocking the thread.
    #[track_caller]
    pub fn retry_async<'a, T, C, F, Fut, M>(
        ctx: &'a TestExecutionContext,
        provider: F,
        constraint: C,
        options: RetryOptions,
        message: M,
    ) -> impl Future<Output = AssertResult> + 'a
    where
        T: 'a,
        C: ResolveConstraint<T> + 'a,
        F: FnMut() -> Fut + 'a,
        Fut: Future<Output = T> + 'a,
        M: Into<Message<'a>> + 'a,
    {
        let site = CallSite::unknown().here();
        let message = message.into();
        async move {
            RetryEvaluator::new(Self::engine(ctx), options)
                .run_async(provider, constraint, message, site)
                .await
        }
    }

    /// Runs `body` inside a multiple-assert scope.
    ///
    /// Failed assertions in the body are collected and returned as one
    /// `MultipleFailures` error at the end. If the body itself returns an
    /// error, that error is returned instead.
    pub fn multiple<F>(ctx: &TestExecutionContext, body: F) -> AssertResult
    where
        F: FnOnce(&TestExecutionContext) -> AssertResult,
    {
        let mut scope = ctx.enter_multiple_scope();
        let outcome = body(ctx);
        let exit = if outcome.is_err() {
            ScopeExit::Unwinding
        } else {
            ScopeExit::Normal
        };
        let released = scope.release(exit);
        outcome.and(released)
    }

    /// Ends the test successfully. Not allowed inside a multiple-assert scope.
    pub fn pass<'m>(ctx: &TestExecutionContext, message: impl Into<Message<'m>>) -> AssertResult {
        Self::reject_in_scope(ctx, "Assert::pass")?;
        Err(AssertionError::Success(message.into().resolve()))
    }

    /// Fails with `message`; queued like any failure inside a scope.
    #[track_caller]
    pub fn fail<'m>(ctx: &TestExecutionContext, message: impl Into<Message<'m>>) -> AssertResult {
        let location = CallSite::unknown().here().location_text();
        AssertPolicy::report(ctx, message.into().resolve(), location)
    }

    /// Ends the test as ignored. Not allowed inside a multiple-assert scope.
    pub fn ignore<'m>(ctx: &TestExecutionContext, message: impl Into<Message<'m>>) -> AssertResult {
        Self::reject_in_scope(ctx, "Assert::ignore")?;
        Err(AssertionError::Ignored(message.into().resolve()))
    }

    /// Ends the test as inconclusive. Not allowed inside a multiple-assert scope.
    pub fn inconclusive<'m>(
        ctx: &TestExecutionContext,
        message: impl Into<Message<'m>>,
    ) -> AssertResult {
        Self::reject_in_scope(ctx, "Assert::inconclusive")?;
        Err(AssertionError::Inconclusive(message.into().resolve()))
    }

    /// Records a warning and continues.
    #[track_caller]
    pub fn warn<'m>(ctx: &TestExecutionContext, message: impl Into<Message<'m>>) -> AssertResult {
        let location = CallSite::unknown().here().location_text();
        WarnPolicy::report(ctx, message.into().resolve(), location)
    }

    fn reject_in_scope(ctx: &TestExecutionContext, method: &str) -> AssertResult {
        if ctx.is_in_multiple_scope() {
            return Err(AssertionError::InvalidOperation(format!(
                "{} may not be used in a multiple assertion block.",
                method
            )));
        }
        Ok(())
    }
}

/// Classic forms, each a thin wrapper around [`Assert::that`].
impl Assert {
    #[track_caller]
    pub fn are_equal<'m, T, E>(
        ctx: &TestExecutionContext,
        expected: E,
        actual: &T,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        T: PartialEq<E> + Debug + ?Sized,
        E: Debug,
    {
        Self::that(ctx, actual, is::equal_to(expected), message)
    }

    #[track_caller]
    pub fn are_not_equal<'m, T, E>(
        ctx: &TestExecutionContext,
        expected: E,
        actual: &T,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        T: PartialEq<E> + Debug + ?Sized,
        E: Debug,
    {
        Self::that(ctx, actual, is::not_equal_to(expected), message)
    }

    /// `arg1 > arg2`
    #[track_caller]
    pub fn greater<'m, T, E>(
        ctx: &TestExecutionContext,
        arg1: &T,
        arg2: E,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        T: PartialOrd<E> + Debug + ?Sized,
        E: Debug,
    {
        Self::that(ctx, arg1, is::greater_than(arg2), message)
    }

    #[track_caller]
    pub fn greater_or_equal<'m, T, E>(
        ctx: &TestExecutionContext,
        arg1: &T,
        arg2: E,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        T: PartialOrd<E> + Debug + ?Sized,
        E: Debug,
    {
        Self::that(ctx, arg1, is::at_least(arg2), message)
    }

    /// `arg1 < arg2`
    #[track_caller]
    pub fn less<'m, T, E>(
        ctx: &TestExecutionContext,
        arg1: &T,
        arg2: E,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        T: PartialOrd<E> + Debug + ?Sized,
        E: Debug,
    {
        Self::that(ctx, arg1, is::less_than(arg2), message)
    }

    #[track_caller]
    pub fn less_or_equal<'m, T, E>(
        ctx: &TestExecutionContext,
        arg1: &T,
        arg2: E,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        T: PartialOrd<E> + Debug + ?Sized,
        E: Debug,
    {
        Self::that(ctx, arg1, is::at_most(arg2), message)
    }

    #[track_caller]
    pub fn is_none<'m, T: Debug>(
        ctx: &TestExecutionContext,
        actual: &Option<T>,
        message: impl Into<Message<'m>>,
    ) -> AssertResult {
        Self::that(ctx, actual, is::none(), message)
    }

    #[track_caller]
    pub fn is_some<'m, T: Debug>(
        ctx: &TestExecutionContext,
        actual: &Option<T>,
        message: impl Into<Message<'m>>,
    ) -> AssertResult {
        Self::that(ctx, actual, is::some(), message)
    }

    #[track_caller]
    pub fn is_empty<'m, T>(
        ctx: &TestExecutionContext,
        actual: &T,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        T: HasLength + Debug + ?Sized,
    {
        Self::that(ctx, actual, is::empty(), message)
    }

    #[track_caller]
    pub fn contains<'m, C, E>(
        ctx: &TestExecutionContext,
        expected: E,
        collection: &C,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        C: Collection + Debug + ?Sized,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        Self::that(ctx, collection, has::item(expected), message)
    }

    /// Expects `code` to panic or return `Err`.
    #[track_caller]
    pub fn throws<'m, R, F>(
        ctx: &TestExecutionContext,
        code: F,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        R: DelegateOutput,
        F: FnOnce() -> R,
    {
        Self::that_code(ctx, code, throws::anything(), message)
    }

    #[track_caller]
    pub fn does_not_throw<'m, R, F>(
        ctx: &TestExecutionContext,
        code: F,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        R: DelegateOutput,
        F: FnOnce() -> R,
    {
        Self::that_code(ctx, code, throws::nothing(), message)
    }
}
