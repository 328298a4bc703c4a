//! attest - constraint-based assertions for Rust tests
//!
//! Every entry point takes the running test's [`TestExecutionContext`], an
//! actual value and a constraint from the `is` / `has` / `does` / `throws`
//! modules, and returns an [`AssertResult`]:
//!
//! ```ignore
//! use attest::{assert_that, is, has, Assert, TestExecutionContext};
//!
//! let ctx = TestExecutionContext::new("totals");
//! assert_that!(&ctx, total, is::greater_than(10))?;
//!
//! Assert::multiple(&ctx, |ctx| {
//!     Assert::that(ctx, &names, has::length(3), ())?;
//!     Assert::that(ctx, &names, has::item("ada"), ())
//! })?;
//! ```
//!
//! - [`Assert`] fails the test, or queues the failure inside a
//!   multiple-assert scope
//! - [`Assume`] makes the test inconclusive
//! - [`Warn`] records a warning and continues
//! - [`CollectionAssert`], [`StringAssert`], [`FileAssert`] and
//!   [`DirectoryAssert`] are the classic forms
//! - [`data`] reads rows for data-driven tests
//!
//! With the `console` feature, [`console::init`] prints assertion events as
//! they happen.

#[macro_use]
mod macros;

mod assert;
mod assume;
mod classic;
mod context;
mod engine;
mod files;
mod policy;
mod result;
mod retry;
mod scope;
mod warn;

pub mod data;

#[cfg(feature = "console")]
pub mod console;

#[cfg(test)]
mod retry_tests;
#[cfg(test)]
mod scope_tests;

pub use assert::Assert;
pub use assume::Assume;
pub use classic::{CollectionAssert, StringAssert};
pub use context::TestExecutionContext;
pub use engine::AssertionEngine;
pub use files::{DirectoryAssert, FileAssert};
pub use policy::{AssertPolicy, AssumePolicy, FailurePolicy, WarnPolicy};
pub use result::{AssertionResult, AssertionStatus, ResultState, TestResult};
pub use retry::{RetryEvaluator, RetryOptions};
pub use scope::{MultipleAssertScope, ScopeExit};
pub use warn::Warn;

pub use attest_config::{AssertConfig, ConfigError, MessageConfig, RetryConfig};
pub use attest_core::constraint;
pub use attest_core::{
    does, has, is, throws, AssertResult, AssertionError, CallSite, Constraint,
    ConstraintExpression, ConstraintExt, ConstraintResult, Describe, Invocation, Message,
    ResolveConstraint,
};
