//! Failure message rendering.
//!
//! A failed assertion is turned into text in three layers:
//! - [`utils`] renders values and clips long strings around a mismatch
//! - [`MessageWriter`] knows the line layout (`Expected:` / `But was:`)
//! - [`MessageFormatter`] combines the user message, the call-site text and
//!   the constraint result into the final diagnostic

mod formatter;
mod site;
pub mod utils;
mod writer;

#[cfg(test)]
mod tests;

pub use formatter::MessageFormatter;
pub use site::{CallSite, Message};
pub use utils::format_value;
pub use writer::{MessageWriter, TextMessageWriter, DEFAULT_LINE_LENGTH};
