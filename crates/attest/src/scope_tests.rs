//! Tests for multiple-assert scopes.

use attest_core::{is, AssertionError};

use crate::assert::Assert;
use crate::assume::Assume;
use crate::context::TestExecutionContext;
use crate::result::{AssertionStatus, ResultState};
use crate::scope::ScopeExit;
use crate::warn::Warn;

fn failing(ctx: &TestExecutionContext, value: i32) {
    // Inside a scope failures are queued, so the call returns Ok.
    Assert::that(ctx, &value, is::greater_than(10), ()).unwrap();
}

// ============================================================================
// Explicit scopes
// ============================================================================

mod explicit {
    use super::*;

    #[test]
    fn test_failures_are_queued_until_release() {
        let ctx = TestExecutionContext::default();
        let mut scope = ctx.enter_multiple_scope();
        assert_eq!(scope.depth(), 1);

        failing(&ctx, 1);
        failing(&ctx, 2);
        assert_eq!(ctx.pending_failures(), 2);

        let err = scope.release(ScopeExit::Normal).unwrap_err();
        match err {
            AssertionError::MultipleFailures { message, failures } => {
                assert_eq!(failures.len(), 2);
                assert!(message.starts_with("\n  One or more failures in Multiple Assert block:"));
                assert!(message.contains("  1)   Expected: greater than 10"));
                assert!(message.contains("  2)   Expected: greater than 10"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(ctx.multiple_assert_level(), 0);
        assert_eq!(ctx.result().state(), Some(ResultState::Failure));
    }

    #[test]
    fn test_release_without_failures_is_ok() {
        let ctx = TestExecutionContext::default();
        let mut scope = ctx.enter_multiple_scope();
        Assert::that(&ctx, &20, is::greater_than(10), ()).unwrap();
        assert!(scope.release(ScopeExit::Normal).is_ok());
    }

    #[test]
    fn test_release_is_idempotent() {
        let ctx = TestExecutionContext::default();
        let mut scope = ctx.enter_multiple_scope();
        failing(&ctx, 1);

        assert!(scope.release(ScopeExit::Normal).is_err());
        assert!(scope.is_released());
        assert!(scope.release(ScopeExit::Normal).is_ok());
        assert_eq!(ctx.multiple_assert_level(), 0);
    }

    #[test]
    fn test_nested_scope_defers_to_outermost() {
        let ctx = TestExecutionContext::default();
        let mut outer = ctx.enter_multiple_scope();
        failing(&ctx, 1);

        let mut inner = ctx.enter_multiple_scope();
        assert_eq!(inner.depth(), 2);
        failing(&ctx, 2);
        assert!(inner.release(ScopeExit::Normal).is_ok());
        assert_eq!(ctx.multiple_assert_level(), 1);

        let err = outer.release(ScopeExit::Normal).unwrap_err();
        assert_eq!(err.failure_count(), 2);
    }

    #[test]
    fn test_failures_before_scope_are_not_aggregated() {
        let ctx = TestExecutionContext::default();
        let _ = Assert::that(&ctx, &1, is::greater_than(10), ());

        let mut scope = ctx.enter_multiple_scope();
        assert_eq!(scope.results_at_entry(), 1);
        failing(&ctx, 2);

        let err = scope.release(ScopeExit::Normal).unwrap_err();
        assert_eq!(err.failure_count(), 1);
    }

    #[test]
    fn test_unwinding_exit_does_not_aggregate() {
        let ctx = TestExecutionContext::default();
        let mut scope = ctx.enter_multiple_scope();
        failing(&ctx, 1);

        assert!(scope.release(ScopeExit::Unwinding).is_ok());
        assert_eq!(ctx.multiple_assert_level(), 0);
        assert_eq!(ctx.result().state(), None);
    }

    #[test]
    fn test_dropping_released_scope_is_quiet() {
        let ctx = TestExecutionContext::default();
        {
            let mut scope = ctx.enter_multiple_scope();
            failing(&ctx, 1);
            let _ = scope.release(ScopeExit::Normal);
        }
        assert_eq!(ctx.multiple_assert_level(), 0);
    }

    #[test]
    fn test_dropping_unreleased_scope_records_without_raising() {
        let ctx = TestExecutionContext::default();
        {
            let _scope = ctx.enter_multiple_scope();
            failing(&ctx, 1);
        }
        assert_eq!(ctx.multiple_assert_level(), 0);
        assert_eq!(ctx.pending_failures(), 1);
        assert_eq!(ctx.result().state(), Some(ResultState::Failure));
    }

    fn early_return(ctx: &TestExecutionContext) -> Result<(), AssertionError> {
        let _scope = ctx.enter_multiple_scope();
        Assert::that(ctx, &1, is::equal_to(2), ())?;
        Err(AssertionError::InvalidArgument("unrelated".into()))
    }

    #[test]
    fn test_early_return_error_is_not_replaced_by_drop() {
        let ctx = TestExecutionContext::default();
        let outcome =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| early_return(&ctx)));

        let returned = outcome.expect("dropping the scope must not panic");
        assert_eq!(
            returned,
            Err(AssertionError::InvalidArgument("unrelated".into()))
        );
        assert_eq!(ctx.multiple_assert_level(), 0);
        assert_eq!(ctx.pending_failures(), 1);
    }

    #[test]
    fn test_dropping_unreleased_scope_without_failures_is_quiet() {
        let ctx = TestExecutionContext::default();
        {
            let _scope = ctx.enter_multiple_scope();
            assert_eq!(ctx.multiple_assert_level(), 1);
        }
        assert_eq!(ctx.multiple_assert_level(), 0);
    }
}

// ============================================================================
// Assert::multiple
// ============================================================================

mod multiple {
    use super::*;

    #[test]
    fn test_collects_every_failure() {
        let ctx = TestExecutionContext::default();
        let err = Assert::multiple(&ctx, |ctx| {
            Assert::that(ctx, &1, is::greater_than(10), ())?;
            Assert::that(ctx, &"abc", is::equal_to("abd"), ())?;
            Assert::that(ctx, &15, is::greater_than(10), ())
        })
        .unwrap_err();

        assert_eq!(err.failure_count(), 2);
        assert_eq!(ctx.assert_count(), 3);
        assert_eq!(ctx.multiple_assert_level(), 0);
    }

    #[test]
    fn test_passing_block_is_ok() {
        let ctx = TestExecutionContext::default();
        let outcome = Assert::multiple(&ctx, |ctx| {
            Assert::that(ctx, &11, is::greater_than(10), ())?;
            Assert::is_true(ctx, true, ())
        });
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_body_error_wins_over_queued_failures() {
        let ctx = TestExecutionContext::default();
        let err = Assert::multiple(&ctx, |ctx| {
            Assert::that(ctx, &1, is::greater_than(10), ())?;
            Assume::that(ctx, &1, is::equal_to(1), ())
        })
        .unwrap_err();

        assert_eq!(
            err,
            AssertionError::InvalidOperation(
                "Assume::that may not be used in a multiple assertion block.".into()
            )
        );
        assert_eq!(ctx.multiple_assert_level(), 0);
    }

    #[test]
    fn test_nested_blocks_raise_once() {
        let ctx = TestExecutionContext::default();
        let err = Assert::multiple(&ctx, |ctx| {
            Assert::multiple(ctx, |ctx| Assert::fail(ctx, "inner"))?;
            Assert::fail(ctx, "outer")
        })
        .unwrap_err();

        match err {
            AssertionError::MultipleFailures { failures, .. } => {
                assert_eq!(failures, vec!["inner".to_string(), "outer".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_warnings_are_not_aggregated() {
        let ctx = TestExecutionContext::default();
        let outcome = Assert::multiple(&ctx, |ctx| {
            Warn::unless(ctx, &1, is::greater_than(10), ())?;
            Assert::warn(ctx, "heads up")
        });
        assert!(outcome.is_ok());
        assert_eq!(ctx.warning_count(), 2);
    }

    #[test]
    fn test_terminal_outcomes_rejected_inside() {
        let ctx = TestExecutionContext::default();
        Assert::multiple(&ctx, |ctx| {
            for err in [
                Assert::pass(ctx, ()).unwrap_err(),
                Assert::ignore(ctx, ()).unwrap_err(),
                Assert::inconclusive(ctx, ()).unwrap_err(),
            ] {
                assert!(err.is_usage_error());
                assert!(err.to_string().contains("may not be used in a multiple assertion block."));
            }
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_queued_failure_keeps_location() {
        let ctx = TestExecutionContext::default();
        let _ = Assert::multiple(&ctx, |ctx| Assert::fail(ctx, "here"));
        let results = ctx.assertion_results();
        assert_eq!(results[0].status, AssertionStatus::Failed);
        let location = results[0].location.as_deref().unwrap();
        assert!(location.contains("scope_tests.rs:"));
    }
}
