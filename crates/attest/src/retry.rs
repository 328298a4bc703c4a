//! Polling assertions that retry until a deadline.

use std::future::Future;
use std::thread;
use std::time::{Duration, Instant};

use attest_config::RetryConfig;
use attest_core::{
    AssertResult, AssertionError, CallSite, Constraint, ConstraintResult, Message,
    ResolveConstraint, TextMessageWriter,
};
use tracing::{debug, trace};

use crate::engine::AssertionEngine;
use crate::policy::FailurePolicy;

/// Timing of a retrying assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryOptions {
    /// Wall-clock budget for all attempts.
    pub timeout: Duration,
    /// Pause between attempts.
    pub interval: Duration,
    /// Write every failed attempt to the test output.
    pub emit_intermediate_failures: bool,
}

impl RetryOptions {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self {
            timeout,
            interval,
            emit_intermediate_failures: false,
        }
    }

    pub fn from_millis(timeout_ms: u64, interval_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(timeout_ms),
            Duration::from_millis(interval_ms),
        )
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            timeout: config.timeout(),
            interval: config.interval(),
            emit_intermediate_failures: config.emit_intermediate_failures,
        }
    }

    pub fn with_intermediate_failures(mut self, emit: bool) -> Self {
        self.emit_intermediate_failures = emit;
        self
    }

    /// Both durations must be positive.
    pub fn validate(&self) -> AssertResult {
        if self.timeout.is_zero() {
            return Err(AssertionError::InvalidArgument(
                "retry timeout must be greater than zero".to_string(),
            ));
        }
        if self.interval.is_zero() {
            return Err(AssertionError::InvalidArgument(
                "retry interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// How long to wait after a failed attempt, or `None` once the deadline has passed.
    fn next_delay(&self, started: Instant) -> Option<Duration> {
        let elapsed = started.elapsed();
        if elapsed >= self.timeout {
            None
        } else {
            Some(self.interval.min(self.timeout - elapsed))
        }
    }
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Re-evaluates a value provider until its constraint passes or time runs out.
///
/// The assertion counts once however many attempts it takes. Only the last
/// failure is reported through the policy.
pub struct RetryEvaluator<'c, P> {
    engine: AssertionEngine<'c, P>,
    options: RetryOptions,
}

impl<'c, P: FailurePolicy> RetryEvaluator<'c, P> {
    pub fn new(engine: AssertionEngine<'c, P>, options: RetryOptions) -> Self {
        Self { engine, options }
    }

    pub fn run<T, C, F>(
        &self,
        mut provider: F,
        constraint: C,
        message: Message<'_>,
        site: CallSite,
    ) -> AssertResult
    where
        C: ResolveConstraint<T>,
        F: FnMut() -> T,
    {
        self.options.validate()?;
        let constraint = self.engine.prepare::<T, C>(constraint)?;

        let started = Instant::now();
        let mut attempt = 0usize;
        let last_failure = loop {
            attempt += 1;
            let result = constraint.apply_to(&provider());
            if result.is_success() {
                debug!(event = "retry_succeeded", test = %self.engine.context().name(), attempt);
                return Ok(());
            }
            self.attempt_failed(attempt, &result);

            match self.options.next_delay(started) {
                Some(delay) => thread::sleep(delay),
                None => break result,
            }
        };

        self.engine.conclude(&last_failure, message, &site)
    }

    /// Async form of [`run`](Self::run); waits with `tokio::time::sleep`.
    pub async fn run_async<T, C, F, Fut>(
        &self,
        mut provider: F,
        constraint: C,
        message: Message<'_>,
        site: CallSite,
    ) -> AssertResult
    where
        C: ResolveConstraint<T>,
        F: FnMut() -> Fut,
        Fut: Future<Output = T>,
    {
        self.options.validate()?;
        let constraint = self.engine.prepare::<T, C>(constraint)?;

        let started = Instant::now();
        let mut attempt = 0usize;
        let last_failure = loop {
            attempt += 1;
            let value = provider().await;
            let result = constraint.apply_to(&value);
            if result.is_success() {
                debug!(event = "retry_succeeded", test = %self.engine.context().name(), attempt);
                return Ok(());
            }
            self.attempt_failed(attempt, &result);

            match self.options.next_delay(started) {
                Some(delay) => tokio::time::sleep(delay).await,
                None => break result,
            }
        };

        self.engine.conclude(&last_failure, message, &site)
    }

    fn attempt_failed(&self, attempt: usize, result: &ConstraintResult) {
        trace!(
            event = "retry_attempt",
            test = %self.engine.context().name(),
            attempt,
            actual = %result.actual()
        );
        if self.options.emit_intermediate_failures {
            let mut writer = TextMessageWriter::new()
                .with_max_line_length(self.engine.context().config().message.max_line_length);
            result.write_message_to(&mut writer);
            let detail = writer.into_string();
            self.engine
                .context()
                .write_diagnostic(&format!("Attempt {} failed:\n{}", attempt, detail));
        }
    }
}
