//! Final diagnostic assembly.

use super::site::{CallSite, Message};
use super::writer::{MessageWriter, TextMessageWriter, DEFAULT_LINE_LENGTH};
use crate::constraint::ConstraintResult;

/// Renders a failed [`ConstraintResult`] into the message carried by an
/// assertion error.
///
/// ```text
/// <user message>
/// Assert::that(<actual expression>, <constraint expression>)
///   Expected: <description>
///   But was:  <actual>
/// ```
///
/// The user-message line is omitted when the message is empty. The
/// expression line is omitted when the call site captured no expression
/// text (plain method calls); the `assert_that!` family always captures it.
#[derive(Debug, Clone, Copy)]
pub struct MessageFormatter {
    method_name: &'static str,
    max_line_length: usize,
}

impl MessageFormatter {
    pub fn new(method_name: &'static str) -> Self {
        Self {
            method_name,
            max_line_length: DEFAULT_LINE_LENGTH,
        }
    }

    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    pub fn method_name(&self) -> &'static str {
        self.method_name
    }

    pub fn format(
        &self,
        message: Message<'_>,
        call_site: &CallSite,
        result: &ConstraintResult,
    ) -> String {
        let mut writer = TextMessageWriter::new().with_max_line_length(self.max_line_length);

        let user_message = message.resolve();
        if !user_message.is_empty() {
            writer.write_message_line(0, &user_message);
        }

        if let Some((actual, constraint)) = call_site.expressions() {
            writer.write_line(&format!("{}({}, {})", self.method_name, actual, constraint));
        }

        result.write_message_to(&mut writer);
        writer.into_string()
    }
}
