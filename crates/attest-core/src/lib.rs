//! attest core - constraints, results and failure messages
//!
//! This crate provides the building blocks shared by every assertion entry
//! point:
//! - [`Constraint`] and its catalogue of concrete constraints
//! - the `is` / `has` / `does` / `throws` builder modules
//! - [`ConstraintExpression`] for operator-based composition
//! - [`MessageFormatter`] and the message writers
//! - [`AssertionError`], the error every assertion returns

pub mod constraint;
pub mod dsl;
pub mod error;
pub mod message;

pub use constraint::{
    apply_to_async, Constraint, ConstraintExpression, ConstraintExt, ConstraintResult,
    ConstraintStatus, DelegateOutput, Describe, Invocation, ResolveConstraint,
};
pub use dsl::{does, has, is, throws};
pub use error::{AssertResult, AssertionError};
pub use message::{CallSite, Message, MessageFormatter, MessageWriter, TextMessageWriter};
