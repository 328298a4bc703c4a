//! The shared evaluation pipeline behind every `that`-style entry point.

use std::any::type_name;
use std::future::Future;
use std::marker::PhantomData;

use attest_core::{
    apply_to_async, AssertResult, AssertionError, CallSite, Constraint, ConstraintResult,
    DelegateOutput, Invocation, Message, MessageFormatter, ResolveConstraint,
};

use crate::context::TestExecutionContext;
use crate::policy::FailurePolicy;

/// Runs assertions for one entry point under failure policy `P`.
///
/// Every call goes through the same steps: policy entry check, constraint
/// resolution, counting, evaluation, and on failure formatting and
/// reporting. Usage errors from the first two steps are returned before the
/// assertion is counted.
pub struct AssertionEngine<'c, P> {
    ctx: &'c TestExecutionContext,
    method: &'static str,
    policy: PhantomData<P>,
}

impl<'c, P: FailurePolicy> AssertionEngine<'c, P> {
    /// `method` names the entry point in failure messages, e.g. `Assert::that`.
    pub fn new(ctx: &'c TestExecutionContext, method: &'static str) -> Self {
        Self {
            ctx,
            method,
            policy: PhantomData,
        }
    }

    pub fn context(&self) -> &'c TestExecutionContext {
        self.ctx
    }

    pub fn that<T, C>(
        &self,
        actual: &T,
        constraint: C,
        message: Message<'_>,
        site: CallSite,
    ) -> AssertResult
    where
        T: ?Sized,
        C: ResolveConstraint<T>,
    {
        let constraint = self.prepare::<T, C>(constraint)?;
        let result = constraint.apply_to(actual);
        self.conclude(&result, message, &site)
    }

    /// Evaluates `delegate` only after the entry check and resolution succeed.
    pub fn that_delegate<T, C, F>(
        &self,
        delegate: F,
        constraint: C,
        message: Message<'_>,
        site: CallSite,
    ) -> AssertResult
    where
        C: ResolveConstraint<T>,
        F: FnOnce() -> T,
    {
        let constraint = self.prepare::<T, C>(constraint)?;
        let actual = delegate();
        let result = constraint.apply_to(&actual);
        self.conclude(&result, message, &site)
    }

    /// Runs `code` under `catch_unwind` and applies the constraint to what it did.
    pub fn that_code<R, C, F>(
        &self,
        code: F,
        constraint: C,
        message: Message<'_>,
        site: CallSite,
    ) -> AssertResult
    where
        R: DelegateOutput,
        C: ResolveConstraint<Invocation<R>>,
        F: FnOnce() -> R,
    {
        if !R::is_observable() {
            return Err(AssertionError::InvalidArgument(format!(
                "{} cannot observe a delegate returning {}; \
                 await it with an async assertion instead",
                self.method,
                type_name::<R>()
            )));
        }
        let constraint = self.prepare::<Invocation<R>, C>(constraint)?;
        let invocation = Invocation::capture(code);
        let result = constraint.apply_to(&invocation);
        self.conclude(&result, message, &site)
    }

    /// Awaits the delegate's future, then evaluates. Never blocks the thread.
    pub async fn that_async<T, C, F, Fut>(
        &self,
        delegate: F,
        constraint: C,
        message: Message<'_>,
        site: CallSite,
    ) -> AssertResult
    where
        C: ResolveConstraint<T>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let constraint = self.prepare::<T, C>(constraint)?;
        let result = apply_to_async(&constraint, delegate()).await;
        self.conclude(&result, message, &site)
    }

    /// Entry check, resolution and counting; the steps before evaluation.
    pub fn prepare<T, C>(&self, constraint: C) -> AssertResult<C::Resolved>
    where
        T: ?Sized,
        C: ResolveConstraint<T>,
    {
        P::check_entry(self.ctx)?;
        let resolved = constraint.resolve()?;
        if P::COUNTS_ASSERTIONS {
            self.ctx.increment_assert_count();
        }
        Ok(resolved)
    }

    /// Formats and reports `result` if it failed.
    pub fn conclude(
        &self,
        result: &ConstraintResult,
        message: Message<'_>,
        site: &CallSite,
    ) -> AssertResult {
        if result.is_success() {
            return Ok(());
        }
        let text = self.format(result, message, site);
        P::report(self.ctx, text, site.location_text())
    }

    pub fn format(
        &self,
        result: &ConstraintResult,
        message: Message<'_>,
        site: &CallSite,
    ) -> String {
        MessageFormatter::new(self.method)
            .with_max_line_length(self.ctx.config().message.max_line_length)
            .format(message, site, result)
    }
}
