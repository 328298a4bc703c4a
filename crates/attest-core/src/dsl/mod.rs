//! Entry points for building constraints.
//!
//! ```ignore
//! use attest_core::dsl::{has, is};
//!
//! is::greater_than(10);
//! has::length(3).and(has::item(7));
//! ```

pub mod does;
pub mod has;
pub mod is;
pub mod throws;
