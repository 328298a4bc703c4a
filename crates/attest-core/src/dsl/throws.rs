//! Constraints applied to a code delegate's [`Invocation`](crate::constraint::Invocation).

use crate::constraint::{ThrowsConstraint, ThrowsKind};

pub fn panic() -> ThrowsConstraint {
    ThrowsConstraint::new(ThrowsKind::Panic)
}

/// The delegate returned `Err`.
pub fn error() -> ThrowsConstraint {
    ThrowsConstraint::new(ThrowsKind::Error)
}

pub fn anything() -> ThrowsConstraint {
    ThrowsConstraint::new(ThrowsKind::Anything)
}

pub fn nothing() -> ThrowsConstraint {
    ThrowsConstraint::new(ThrowsKind::Nothing)
}
