//! What a failed constraint means for the running test.

use attest_core::{AssertResult, AssertionError};
use tracing::{debug, info, warn};

use crate::context::TestExecutionContext;
use crate::result::AssertionStatus;

/// Decides how an assertion entry point treats a failure.
///
/// The engine calls [`check_entry`](FailurePolicy::check_entry) before doing
/// anything else and [`report`](FailurePolicy::report) once a constraint has
/// failed and its message is formatted.
pub trait FailurePolicy {
    /// Whether a call increments the context's assertion counter.
    const COUNTS_ASSERTIONS: bool = true;

    /// Rejects calls made where the policy is not allowed.
    fn check_entry(_ctx: &TestExecutionContext) -> AssertResult {
        Ok(())
    }

    fn report(
        ctx: &TestExecutionContext,
        message: String,
        location: Option<String>,
    ) -> AssertResult;
}

/// Fail now outside a multiple-assert scope; queue and continue inside one.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssertPolicy;

impl FailurePolicy for AssertPolicy {
    fn report(
        ctx: &TestExecutionContext,
        message: String,
        location: Option<String>,
    ) -> AssertResult {
        ctx.record_assertion(AssertionStatus::Failed, message.clone(), location);

        let depth = ctx.multiple_assert_level();
        if depth == 0 {
            info!(event = "assertion_failed", test = %ctx.name(), "{}", message);
            Err(AssertionError::Failed(message))
        } else {
            debug!(
                event = "assertion_queued",
                test = %ctx.name(),
                depth,
                pending = ctx.pending_failures()
            );
            Ok(())
        }
    }
}

/// Unmet assumptions make the test inconclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumePolicy;

impl FailurePolicy for AssumePolicy {
    const COUNTS_ASSERTIONS: bool = false;

    fn check_entry(ctx: &TestExecutionContext) -> AssertResult {
        if ctx.is_in_multiple_scope() {
            return Err(AssertionError::InvalidOperation(
                "Assume::that may not be used in a multiple assertion block.".to_string(),
            ));
        }
        Ok(())
    }

    fn report(
        ctx: &TestExecutionContext,
        message: String,
        _location: Option<String>,
    ) -> AssertResult {
        debug!(event = "assumption_failed", test = %ctx.name());
        Err(AssertionError::Inconclusive(message))
    }
}

/// Record a warning and carry on, at any depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarnPolicy;

impl FailurePolicy for WarnPolicy {
    fn report(
        ctx: &TestExecutionContext,
        message: String,
        location: Option<String>,
    ) -> AssertResult {
        warn!(event = "warning_recorded", test = %ctx.name(), "{}", message);
        ctx.record_assertion(AssertionStatus::Warning, message, location);
        Ok(())
    }
}
