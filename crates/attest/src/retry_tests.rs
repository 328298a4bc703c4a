//! Tests for retrying assertions.

use std::time::Duration;

use attest_config::AssertConfig;
use attest_core::{is, AssertionError, CallSite, Message};
use attest_test::{CountingConstraint, FlakyProvider, SequenceProvider};

use crate::assert::Assert;
use crate::context::TestExecutionContext;
use crate::engine::AssertionEngine;
use crate::policy::WarnPolicy;
use crate::retry::{RetryEvaluator, RetryOptions};

fn quick() -> RetryOptions {
    RetryOptions::from_millis(500, 5)
}

// ============================================================================
// Options
// ============================================================================

mod options {
    use super::*;

    #[test]
    fn test_default_matches_config_defaults() {
        let options = RetryOptions::default();
        assert_eq!(options.timeout, Duration::from_millis(1000));
        assert_eq!(options.interval, Duration::from_millis(100));
        assert!(!options.emit_intermediate_failures);
    }

    #[test]
    fn test_from_config() {
        let config = AssertConfig::new()
            .with_retry_timeout_ms(250)
            .with_retry_interval_ms(25)
            .with_intermediate_failures(true);
        let options = RetryOptions::from_config(&config.retry);
        assert_eq!(options.timeout, Duration::from_millis(250));
        assert_eq!(options.interval, Duration::from_millis(25));
        assert!(options.emit_intermediate_failures);
    }

    #[test]
    fn test_validate_rejects_zero_durations() {
        assert!(RetryOptions::from_millis(0, 5).validate().is_err());
        assert!(RetryOptions::from_millis(5, 0).validate().is_err());
        assert!(quick().validate().is_ok());
    }
}

// ============================================================================
// Blocking retry
// ============================================================================

mod blocking {
    use super::*;

    #[test]
    fn test_succeeds_once_provider_recovers() {
        let ctx = TestExecutionContext::default();
        let provider = FlakyProvider::new(3, 0, 1);

        Assert::retry(&ctx, || provider.next(), is::equal_to(1), quick(), ()).unwrap();

        assert_eq!(provider.calls(), 3);
        assert_eq!(ctx.assert_count(), 1);
        assert!(ctx.assertion_results().is_empty());
    }

    #[test]
    fn test_reports_last_failure_after_timeout() {
        let ctx = TestExecutionContext::default();
        let provider = SequenceProvider::new([1, 2, 3]);
        let options = RetryOptions::from_millis(100, 5);

        let err = Assert::retry(&ctx, || provider.next(), is::greater_than(10), options, ())
            .unwrap_err();

        assert!(provider.calls() >= 3);
        assert_eq!(
            err,
            AssertionError::Failed("  Expected: greater than 10\n  But was:  3".into())
        );
        assert_eq!(ctx.pending_failures(), 1);
    }

    #[test]
    fn test_invalid_options_fail_before_first_attempt() {
        let ctx = TestExecutionContext::default();
        let provider = FlakyProvider::new(1, 0, 1);
        let options = RetryOptions::from_millis(0, 5);

        let err = Assert::retry(&ctx, || provider.next(), is::equal_to(1), options, ())
            .unwrap_err();

        assert!(matches!(err, AssertionError::InvalidArgument(_)));
        assert_eq!(provider.calls(), 0);
        assert_eq!(ctx.assert_count(), 0);
    }

    #[test]
    fn test_constraint_resolved_once() {
        let ctx = TestExecutionContext::default();
        let provider = FlakyProvider::new(4, 0, 1);
        let constraint = CountingConstraint::new(is::equal_to(1));
        let handle = constraint.clone();

        Assert::retry(&ctx, || provider.next(), constraint, quick(), ()).unwrap();

        assert_eq!(handle.resolved(), 1);
        assert_eq!(handle.applied(), 4);
    }

    #[test]
    fn test_intermediate_failures_written_to_output() {
        let ctx = TestExecutionContext::default();
        let provider = FlakyProvider::new(3, 0, 1);
        let options = quick().with_intermediate_failures(true);

        Assert::retry(&ctx, || provider.next(), is::equal_to(1), options, ()).unwrap();

        let output = ctx.output();
        assert!(output.contains("Attempt 1 failed:\n  Expected: 1\n  But was:  0"));
        assert!(output.contains("Attempt 2 failed:"));
        assert!(!output.contains("Attempt 3 failed:"));
    }

    #[test]
    fn test_eventually_uses_context_config() {
        let config = AssertConfig::new()
            .with_retry_timeout_ms(500)
            .with_retry_interval_ms(5);
        let ctx = TestExecutionContext::new("eventually").with_config(config);
        let provider = FlakyProvider::new(2, false, true);

        Assert::eventually(&ctx, || provider.next(), is::true_(), ()).unwrap();
        assert_eq!(provider.calls(), 2);
    }

    #[test]
    fn test_failure_inside_scope_is_queued() {
        let ctx = TestExecutionContext::default();
        let options = RetryOptions::from_millis(20, 5);

        let err = Assert::multiple(&ctx, |ctx| {
            Assert::retry(ctx, || 0, is::equal_to(1), options, "never ready")?;
            Assert::that(ctx, &2, is::equal_to(2), ())
        })
        .unwrap_err();

        assert_eq!(err.failure_count(), 1);
        assert!(err.to_string().contains("never ready"));
    }

    #[test]
    fn test_evaluator_with_warn_policy() {
        let ctx = TestExecutionContext::default();
        let engine = AssertionEngine::<WarnPolicy>::new(&ctx, "Warn::unless");
        let evaluator = RetryEvaluator::new(engine, RetryOptions::from_millis(20, 5));

        let outcome = evaluator.run(|| 0, is::equal_to(1), Message::Empty, CallSite::unknown());

        assert!(outcome.is_ok());
        assert_eq!(ctx.warning_count(), 1);
    }
}

// ============================================================================
// Async retry
// ============================================================================

mod asynchronous {
    use super::*;

    #[tokio::test]
    async fn test_retry_async_succeeds() {
        let ctx = TestExecutionContext::default();
        let provider = FlakyProvider::new(3, "starting", "ready");

        Assert::retry_async(
            &ctx,
            || {
                let provider = provider.clone();
                async move { provider.next() }
            },
            is::equal_to("ready"),
            quick(),
            (),
        )
        .await
        .unwrap();

        assert_eq!(provider.calls(), 3);
        assert_eq!(ctx.assert_count(), 1);
    }

    #[tokio::test]
    async fn test_retry_async_times_out() {
        let ctx = TestExecutionContext::default();
        let err = Assert::retry_async(
            &ctx,
            || async { 0 },
            is::greater_than(0),
            RetryOptions::from_millis(30, 5),
            "still zero",
        )
        .await
        .unwrap_err();

        assert_eq!(
            err,
            AssertionError::Failed("still zero\n  Expected: greater than 0\n  But was:  0".into())
        );
    }
}
