//! Error types for attest

use thiserror::Error;

/// Every way an assertion call can end other than returning normally.
///
/// Test code propagates these with `?`. The runner inspects the variant to
/// decide the outcome of the test.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    /// A constraint was not satisfied.
    #[error("{0}")]
    Failed(String),

    /// An assumption was not met; the test cannot give a meaningful result.
    #[error("{0}")]
    Inconclusive(String),

    /// The test asked to be reported as ignored.
    #[error("{0}")]
    Ignored(String),

    /// The test asked to stop early with a passing result.
    #[error("{0}")]
    Success(String),

    /// Failures queued inside a multiple-assert scope, raised once at the
    /// outermost scope exit.
    #[error("{message}")]
    MultipleFailures {
        message: String,
        failures: Vec<String>,
    },

    /// The calling test passed an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The calling test used an operation where it is not allowed.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl AssertionError {
    /// Returns true for errors caused by misuse of the API rather than by the
    /// system under test. These are never queued.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            AssertionError::InvalidArgument(_) | AssertionError::InvalidOperation(_)
        )
    }

    /// Number of individual assertion failures carried by this error.
    pub fn failure_count(&self) -> usize {
        match self {
            AssertionError::Failed(_) => 1,
            AssertionError::MultipleFailures { failures, .. } => failures.len(),
            _ => 0,
        }
    }
}

/// Result type alias for assertion operations
pub type AssertResult<T = ()> = std::result::Result<T, AssertionError>;
