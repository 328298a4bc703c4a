//! Multiple-assert scopes.

use std::thread;

use attest_core::{AssertResult, AssertionError};
use tracing::{debug, info, warn};

use crate::context::TestExecutionContext;
use crate::result::legacy_failure_message;

/// How control is leaving a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeExit {
    /// The block ran to its end.
    Normal,
    /// An unrelated error or panic is leaving the block; it must not be
    /// replaced by the queued failures.
    Unwinding,
}

/// A multiple-assert block.
///
/// While any scope is open, failed assertions are recorded and execution
/// continues. Releasing the outermost scope turns the failures recorded since
/// it was entered into one [`AssertionError::MultipleFailures`].
///
/// Scopes nest and must be released innermost first. Only
/// [`release`](Self::release) and `Assert::multiple` hand back the aggregate.
/// Dropping an unreleased scope releases it without raising: an error or
/// panic already leaving the block keeps its place, and any queued failures
/// stay recorded in the context's result.
#[must_use = "a scope that is dropped immediately queues nothing"]
#[derive(Debug)]
pub struct MultipleAssertScope<'c> {
    ctx: &'c TestExecutionContext,
    depth: usize,
    results_at_entry: usize,
    released: bool,
}

impl<'c> MultipleAssertScope<'c> {
    pub(crate) fn enter(ctx: &'c TestExecutionContext) -> Self {
        let (depth, results_at_entry) = ctx.enter_multiple_level();
        debug!(event = "scope_entered", test = %ctx.name(), depth);
        Self {
            ctx,
            depth,
            results_at_entry,
            released: false,
        }
    }

    /// Nesting depth of this scope, starting at 1.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Assertion results already recorded when the scope was entered.
    pub fn results_at_entry(&self) -> usize {
        self.results_at_entry
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Leaves the scope. Only the first call has an effect.
    ///
    /// Returns the aggregate failure when this was the outermost scope, the
    /// exit is [`ScopeExit::Normal`] and failures were queued inside it.
    pub fn release(&mut self, exit: ScopeExit) -> AssertResult {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let depth = self.ctx.exit_multiple_level();
        debug!(event = "scope_released", test = %self.ctx.name(), depth, exit = ?exit);
        if depth > 0 || exit == ScopeExit::Unwinding {
            return Ok(());
        }

        let failures = self.ctx.failures_since(self.results_at_entry);
        if failures.is_empty() {
            return Ok(());
        }

        self.ctx.record_test_completion();
        let message = legacy_failure_message(failures.iter().map(String::as_str));
        info!(
            event = "multiple_failures",
            test = %self.ctx.name(),
            count = failures.len()
        );
        Err(AssertionError::MultipleFailures { message, failures })
    }
}

impl Drop for MultipleAssertScope<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let exit = if thread::panicking() {
            ScopeExit::Unwinding
        } else {
            ScopeExit::Normal
        };
        if let Err(err) = self.release(exit) {
            warn!(
                event = "scope_dropped_with_failures",
                test = %self.ctx.name(),
                count = err.failure_count(),
                "multiple-assert scope dropped without release"
            );
        }
    }
}
