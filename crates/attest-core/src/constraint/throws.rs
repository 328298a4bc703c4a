//! Capturing and inspecting what a code delegate did.

use std::any::Any;
use std::fmt::Debug;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::thread::JoinHandle;

use super::{Constraint, ConstraintResult, Describe};

/// Return types a synchronous code delegate may have.
///
/// A delegate whose completion cannot be observed by the caller (a spawned
/// thread, an unawaited future) reports `is_observable() == false` and is
/// rejected before it runs.
pub trait DelegateOutput {
    fn is_observable() -> bool {
        true
    }

    /// Message of the error this output represents, if any.
    fn error_message(&self) -> Option<String> {
        None
    }
}

impl DelegateOutput for () {}

impl<T, E: Debug> DelegateOutput for Result<T, E> {
    fn error_message(&self) -> Option<String> {
        self.as_ref().err().map(|err| format!("{:?}", err))
    }
}

impl<T> DelegateOutput for JoinHandle<T> {
    fn is_observable() -> bool {
        false
    }
}

impl<'a, O> DelegateOutput for Pin<Box<dyn Future<Output = O> + Send + 'a>> {
    fn is_observable() -> bool {
        false
    }
}

impl<'a, O> DelegateOutput for Pin<Box<dyn Future<Output = O> + 'a>> {
    fn is_observable() -> bool {
        false
    }
}

/// What running a code delegate produced.
#[derive(Debug)]
pub enum Invocation<R> {
    Returned(R),
    Panicked(String),
}

impl<R> Invocation<R> {
    /// Runs `code`, converting a panic into [`Invocation::Panicked`].
    pub fn capture<F>(code: F) -> Self
    where
        F: FnOnce() -> R,
    {
        match panic::catch_unwind(AssertUnwindSafe(code)) {
            Ok(value) => Invocation::Returned(value),
            Err(payload) => Invocation::Panicked(panic_message(&*payload)),
        }
    }
}

impl<R: DelegateOutput> Invocation<R> {
    pub fn thrown(&self) -> Option<Thrown> {
        match self {
            Invocation::Returned(value) => value.error_message().map(Thrown::Error),
            Invocation::Panicked(message) => Some(Thrown::Panic(message.clone())),
        }
    }
}

/// Text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

/// A panic or error raised by a delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thrown {
    Panic(String),
    Error(String),
}

impl Thrown {
    pub fn message(&self) -> &str {
        match self {
            Thrown::Panic(message) | Thrown::Error(message) => message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrowsKind {
    Panic,
    Error,
    Anything,
    Nothing,
}

/// Expectation about how a delegate ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrowsConstraint {
    kind: ThrowsKind,
    message: Option<String>,
}

impl ThrowsConstraint {
    pub fn new(kind: ThrowsKind) -> Self {
        Self { kind, message: None }
    }

    /// Additionally requires the panic or error message to contain `fragment`.
    pub fn with_message(mut self, fragment: impl Into<String>) -> Self {
        self.message = Some(fragment.into());
        self
    }

    fn message_matches(&self, message: &str) -> bool {
        self.message
            .as_deref()
            .map_or(true, |fragment| message.contains(fragment))
    }
}

impl Describe for ThrowsConstraint {
    fn description(&self) -> String {
        let base = match self.kind {
            ThrowsKind::Panic => "a panic",
            ThrowsKind::Error => "an error",
            ThrowsKind::Anything => "a panic or error",
            ThrowsKind::Nothing => "no panic or error",
        };
        match &self.message {
            Some(fragment) if self.kind != ThrowsKind::Nothing => {
                format!("{} with message containing {:?}", base, fragment)
            }
            _ => base.to_string(),
        }
    }

    fn display_name(&self) -> String {
        match self.kind {
            ThrowsKind::Nothing => "ThrowsNothing",
            _ => "Throws",
        }
        .to_string()
    }
}

impl<R: DelegateOutput> Constraint<Invocation<R>> for ThrowsConstraint {
    fn apply_to(&self, actual: &Invocation<R>) -> ConstraintResult {
        let thrown = actual.thrown();
        let is_success = match (self.kind, &thrown) {
            (ThrowsKind::Nothing, thrown) => thrown.is_none(),
            (ThrowsKind::Panic, Some(Thrown::Panic(message)))
            | (ThrowsKind::Error, Some(Thrown::Error(message))) => self.message_matches(message),
            (ThrowsKind::Anything, Some(thrown)) => self.message_matches(thrown.message()),
            _ => false,
        };
        let actual_text = match &thrown {
            None => "no panic or error".to_string(),
            Some(Thrown::Panic(message)) => format!("panic with message {:?}", message),
            Some(Thrown::Error(message)) => format!("error {}", message),
        };
        ConstraintResult::new(self, actual_text, is_success)
    }
}

resolves_to_self!([] ThrowsConstraint);
