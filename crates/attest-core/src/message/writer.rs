//! Line-oriented writers for failure messages.

use std::fmt;

use super::utils::{clip_expected_and_actual, escape_control_chars, find_mismatch_position};

/// Default width used when clipping long expected/actual values.
pub const DEFAULT_LINE_LENGTH: usize = 78;

const PFX_EXPECTED: &str = "  Expected: ";
const PFX_ACTUAL: &str = "  But was:  ";
const PREFIX_LENGTH: usize = PFX_EXPECTED.len();

/// Destination for the structured parts of a failure message.
///
/// Implementors only provide [`write`](MessageWriter::write); the layout of
/// the expected/actual lines is shared.
pub trait MessageWriter {
    /// Appends raw text.
    fn write(&mut self, text: &str);

    /// Maximum width of a message line.
    fn max_line_length(&self) -> usize {
        DEFAULT_LINE_LENGTH
    }

    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    /// Writes a line indented by two spaces per level.
    fn write_message_line(&mut self, level: usize, message: &str) {
        for _ in 0..level {
            self.write("  ");
        }
        self.write_line(message);
    }

    /// Writes the `Expected:` and `But was:` lines.
    fn display_differences(&mut self, expected: &str, actual: &str) {
        self.write(PFX_EXPECTED);
        self.write_line(expected);
        self.write(PFX_ACTUAL);
        self.write_line(actual);
    }

    /// Writes two strings with a caret line pointing at the first difference.
    ///
    /// Both strings are given raw, without surrounding quotes; control
    /// characters are escaped for display and the caret follows the escaped
    /// text. When `clip` is set they are shortened to fit
    /// [`max_line_length`](MessageWriter::max_line_length).
    fn display_string_differences(
        &mut self,
        expected: &str,
        actual: &str,
        mismatch: usize,
        ignore_case: bool,
        clip: bool,
    ) {
        let (expected, actual) = if clip {
            let width = self.max_line_length().saturating_sub(PREFIX_LENGTH);
            clip_expected_and_actual(expected, actual, width, mismatch)
        } else {
            (expected.to_string(), actual.to_string())
        };
        let expected = escape_control_chars(&expected);
        let actual = escape_control_chars(&actual);
        let mismatch = find_mismatch_position(&expected, &actual, ignore_case);

        self.write(PFX_EXPECTED);
        self.write(&format!("\"{}\"", expected));
        if ignore_case {
            self.write(", ignoring case");
        }
        self.write("\n");
        self.write(PFX_ACTUAL);
        self.write_line(&format!("\"{}\"", actual));

        if let Some(position) = mismatch {
            self.write_caret_line(position);
        }
    }

    /// Writes `  ---^` with the caret under character `mismatch` of a quoted value.
    fn write_caret_line(&mut self, mismatch: usize) {
        let dashes = "-".repeat(PREFIX_LENGTH + mismatch - 1);
        self.write_line(&format!("  {}^", dashes));
    }
}

/// [`MessageWriter`] collecting into a `String`.
#[derive(Debug, Clone)]
pub struct TextMessageWriter {
    buffer: String,
    max_line_length: usize,
}

impl TextMessageWriter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            max_line_length: DEFAULT_LINE_LENGTH,
        }
    }

    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Returns the collected text without its trailing newline.
    pub fn into_string(mut self) -> String {
        while self.buffer.ends_with('\n') {
            self.buffer.pop();
        }
        self.buffer
    }
}

impl Default for TextMessageWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageWriter for TextMessageWriter {
    fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn max_line_length(&self) -> usize {
        self.max_line_length
    }
}

impl fmt::Display for TextMessageWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}
