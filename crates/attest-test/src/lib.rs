//! Shared test fixtures for attest crates.
//!
//! This crate provides value providers, instrumented constraints and sample
//! data for testing. It depends only on `attest-core` so `attest` can use it
//! as a dev-dependency.
//!
//! - [`provider`] - providers that change their answer between calls
//! - [`constraint`] - constraints that record how often they are applied
//! - [`records`] - CSV sample data and the record type it deserializes to
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! attest-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use attest_test::{FlakyProvider, CountingConstraint};
//! ```

pub mod constraint;
pub mod provider;
pub mod records;

pub use constraint::CountingConstraint;
pub use provider::{FlakyProvider, SequenceProvider};
pub use records::{Person, PEOPLE_CSV, PEOPLE_TSV_NO_HEADER};
