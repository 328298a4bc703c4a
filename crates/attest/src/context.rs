//! Execution context for one running test.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use attest_config::AssertConfig;
use attest_core::AssertionError;
use tracing::warn;

use crate::result::{AssertionResult, AssertionStatus, TestResult};
use crate::scope::MultipleAssertScope;

#[derive(Debug, Default)]
struct ContextState {
    multiple_assert_level: usize,
    result: TestResult,
}

/// State shared by every assertion made while a test runs.
///
/// Passed explicitly to each entry point. A shared reference is enough:
/// the assertion counter is atomic and the rest sits behind one mutex that is
/// never held while user code runs.
#[derive(Debug)]
pub struct TestExecutionContext {
    name: String,
    config: AssertConfig,
    assert_count: AtomicUsize,
    state: Mutex<ContextState>,
}

impl TestExecutionContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: AssertConfig::default(),
            assert_count: AtomicUsize::new(0),
            state: Mutex::new(ContextState::default()),
        }
    }

    pub fn with_config(mut self, config: AssertConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &AssertConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, ContextState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn increment_assert_count(&self) {
        self.assert_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Assertions evaluated so far, passing or failing.
    pub fn assert_count(&self) -> usize {
        self.assert_count.load(Ordering::SeqCst)
    }

    /// Current multiple-assert depth; zero outside any scope.
    pub fn multiple_assert_level(&self) -> usize {
        self.lock().multiple_assert_level
    }

    pub fn is_in_multiple_scope(&self) -> bool {
        self.multiple_assert_level() > 0
    }

    /// Opens a multiple-assert scope. Failures are queued until the outermost
    /// scope is released.
    pub fn enter_multiple_scope(&self) -> MultipleAssertScope<'_> {
        MultipleAssertScope::enter(self)
    }

    /// Increments the depth. Returns the new depth and the number of results
    /// recorded so far.
    pub(crate) fn enter_multiple_level(&self) -> (usize, usize) {
        let mut state = self.lock();
        state.multiple_assert_level += 1;
        (
            state.multiple_assert_level,
            state.result.assertion_results().len(),
        )
    }

    /// Decrements the depth and returns the new value.
    pub(crate) fn exit_multiple_level(&self) -> usize {
        let mut state = self.lock();
        if state.multiple_assert_level == 0 {
            warn!(
                event = "scope_underflow",
                test = %self.name,
                "multiple-assert scope released with no scope active"
            );
            return 0;
        }
        state.multiple_assert_level -= 1;
        state.multiple_assert_level
    }

    pub fn record_assertion(
        &self,
        status: AssertionStatus,
        message: impl Into<String>,
        location: Option<String>,
    ) {
        let assertion = AssertionResult::new(status, message).with_location(location);
        self.lock().result.record_assertion(assertion);
    }

    /// Failed assertions recorded so far.
    pub fn pending_failures(&self) -> usize {
        self.lock().result.pending_failures()
    }

    pub fn warning_count(&self) -> usize {
        self.lock().result.warning_count()
    }

    pub fn assertion_results(&self) -> Vec<AssertionResult> {
        self.lock().result.assertion_results().to_vec()
    }

    /// Messages of `Failed` assertions recorded at or after `index`.
    pub(crate) fn failures_since(&self, index: usize) -> Vec<String> {
        self.lock()
            .result
            .assertion_results()
            .iter()
            .skip(index)
            .filter(|assertion| assertion.status == AssertionStatus::Failed)
            .map(|assertion| assertion.message.clone())
            .collect()
    }

    pub fn record_test_completion(&self) {
        self.lock().result.record_test_completion();
    }

    pub fn record_error(&self, error: &AssertionError) {
        self.lock().result.record_error(error);
    }

    /// Snapshot of the test result.
    pub fn result(&self) -> TestResult {
        self.lock().result.clone()
    }

    /// Appends text to the test's diagnostic output.
    pub fn write_diagnostic(&self, text: &str) {
        self.lock().result.write_output(text);
    }

    pub fn output(&self) -> String {
        self.lock().result.output().to_string()
    }
}

impl Default for TestExecutionContext {
    fn default() -> Self {
        Self::new("test")
    }
}
