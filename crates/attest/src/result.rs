//! Per-test outcome bookkeeping.

use attest_core::AssertionError;

/// Outcome of a single recorded assertion, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssertionStatus {
    Inconclusive,
    Passed,
    Warning,
    Failed,
    Error,
}

/// Overall outcome of a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultState {
    Inconclusive,
    Success,
    Warning,
    Failure,
    Error,
    Ignored,
}

impl From<AssertionStatus> for ResultState {
    fn from(status: AssertionStatus) -> Self {
        match status {
            AssertionStatus::Inconclusive => ResultState::Inconclusive,
            AssertionStatus::Passed => ResultState::Success,
            AssertionStatus::Warning => ResultState::Warning,
            AssertionStatus::Failed => ResultState::Failure,
            AssertionStatus::Error => ResultState::Error,
        }
    }
}

/// One recorded assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    pub status: AssertionStatus,
    pub message: String,
    /// `file:line` of the assertion, when known.
    pub location: Option<String>,
}

impl AssertionResult {
    pub fn new(status: AssertionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }
}

/// Everything a test run has recorded so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestResult {
    assertion_results: Vec<AssertionResult>,
    state: Option<ResultState>,
    message: String,
    output: String,
}

impl TestResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assertion_results(&self) -> &[AssertionResult] {
        &self.assertion_results
    }

    pub fn record_assertion(&mut self, assertion: AssertionResult) {
        self.assertion_results.push(assertion);
    }

    /// Number of `Failed` assertions recorded so far.
    pub fn pending_failures(&self) -> usize {
        self.count_status(AssertionStatus::Failed)
    }

    pub fn warning_count(&self) -> usize {
        self.count_status(AssertionStatus::Warning)
    }

    fn count_status(&self, status: AssertionStatus) -> usize {
        self.assertion_results
            .iter()
            .filter(|assertion| assertion.status == status)
            .count()
    }

    pub fn worst_assertion_status(&self) -> Option<AssertionStatus> {
        self.assertion_results
            .iter()
            .map(|assertion| assertion.status)
            .max()
    }

    /// Final state, once the test has completed or errored.
    pub fn state(&self) -> Option<ResultState> {
        self.state
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Appends a line to the diagnostic output.
    pub fn write_output(&mut self, text: &str) {
        self.output.push_str(text);
        if !text.ends_with('\n') {
            self.output.push('\n');
        }
    }

    fn set_result(&mut self, state: ResultState, message: String) {
        self.state = Some(state);
        self.message = message;
    }

    /// Derives the final state from the recorded assertions.
    pub fn record_test_completion(&mut self) {
        match self.assertion_results.as_slice() {
            [] => self.set_result(ResultState::Success, String::new()),
            [only] => {
                let (state, message) = (only.status.into(), only.message.clone());
                self.set_result(state, message);
            }
            _ => {
                let state = self
                    .worst_assertion_status()
                    .map_or(ResultState::Success, ResultState::from);
                let message = self.legacy_failure_message();
                self.set_result(state, message);
            }
        }
    }

    /// Records the error a test ended with.
    pub fn record_error(&mut self, error: &AssertionError) {
        match error {
            AssertionError::Failed(message) => {
                if !self
                    .assertion_results
                    .iter()
                    .any(|assertion| &assertion.message == message)
                {
                    let assertion = AssertionResult::new(AssertionStatus::Failed, message.clone());
                    self.record_assertion(assertion);
                }
                self.set_result(ResultState::Failure, message.clone());
            }
            AssertionError::MultipleFailures { .. } => {
                let message = self.legacy_failure_message();
                self.set_result(ResultState::Failure, message);
            }
            AssertionError::Inconclusive(message) => {
                self.set_result(ResultState::Inconclusive, message.clone())
            }
            AssertionError::Ignored(message) => {
                self.set_result(ResultState::Ignored, message.clone())
            }
            AssertionError::Success(message) => {
                self.set_result(ResultState::Success, message.clone())
            }
            AssertionError::InvalidArgument(_) | AssertionError::InvalidOperation(_) => {
                let mut message = error.to_string();
                if !self.assertion_results.is_empty() {
                    message.push_str(&self.legacy_failure_message());
                    let assertion = AssertionResult::new(AssertionStatus::Error, error.to_string());
                    self.record_assertion(assertion);
                }
                self.set_result(ResultState::Error, message);
            }
        }
    }

    /// Listing of every recorded assertion, for runners that only show one message.
    pub fn legacy_failure_message(&self) -> String {
        legacy_failure_message(self.assertion_results.iter().map(|a| a.message.as_str()))
    }
}

/// `"\n  One or more failures in Multiple Assert block:\n  1) ...\n"`
pub(crate) fn legacy_failure_message<'a>(messages: impl IntoIterator<Item = &'a str>) -> String {
    let mut text = String::from("\n  One or more failures in Multiple Assert block:\n");
    for (index, message) in messages.into_iter().enumerate() {
        text.push_str(&format!("  {}) {}\n", index + 1, message));
    }
    text
}
