//! Outcome of applying a constraint.

use super::Describe;
use crate::message::utils::{find_mismatch_position, format_value};
use crate::message::MessageWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rendering {
    Standard,
    StringDifference {
        expected: String,
        actual: String,
        ignore_case: bool,
    },
}

/// Immutable result of one constraint evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintResult {
    status: ConstraintStatus,
    name: String,
    description: String,
    actual: String,
    detail_lines: Vec<String>,
    rendering: Rendering,
}

impl ConstraintResult {
    /// Result for `constraint` with an already rendered actual value.
    pub fn new<D: Describe + ?Sized>(constraint: &D, actual: String, is_success: bool) -> Self {
        Self {
            status: if is_success {
                ConstraintStatus::Success
            } else {
                ConstraintStatus::Failure
            },
            name: constraint.display_name(),
            description: constraint.description(),
            actual,
            detail_lines: Vec::new(),
            rendering: Rendering::Standard,
        }
    }

    /// Failed string comparison, rendered with lengths and a caret line.
    ///
    /// `expected` and `actual` are the raw string contents without quotes;
    /// lengths and the mismatch index are counted on them.
    pub fn string_difference<D: Describe + ?Sized>(
        constraint: &D,
        expected: &str,
        actual: &str,
        ignore_case: bool,
    ) -> Self {
        let mut result = Self::new(constraint, format_value(actual), false);
        result.rendering = Rendering::StringDifference {
            expected: expected.to_string(),
            actual: actual.to_string(),
            ignore_case,
        };
        result
    }

    /// Adds a line shown after the expected/actual pair.
    pub fn with_detail(mut self, line: impl Into<String>) -> Self {
        self.detail_lines.push(line.into());
        self
    }

    pub fn status(&self) -> ConstraintStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == ConstraintStatus::Success
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }

    pub fn detail_lines(&self) -> &[String] {
        &self.detail_lines
    }

    /// Writes the expected/actual lines and any detail lines.
    pub fn write_message_to(&self, writer: &mut dyn MessageWriter) {
        match &self.rendering {
            Rendering::Standard => writer.display_differences(&self.description, &self.actual),
            Rendering::StringDifference {
                expected,
                actual,
                ignore_case,
            } => {
                let expected_length = expected.chars().count();
                let actual_length = actual.chars().count();
                let mismatch =
                    find_mismatch_position(expected, actual, *ignore_case).unwrap_or(0);
                let summary = if expected_length == actual_length {
                    format!(
                        "String lengths are both {}. Strings differ at index {}.",
                        expected_length, mismatch
                    )
                } else {
                    format!(
                        "Expected string length {} but was {}. Strings differ at index {}.",
                        expected_length, actual_length, mismatch
                    )
                };
                writer.write_message_line(1, &summary);
                writer.display_string_differences(expected, actual, mismatch, *ignore_case, true);
            }
        }

        for line in &self.detail_lines {
            writer.write_message_line(1, line);
        }
    }

    /// Writes only the rendered actual value.
    pub fn write_actual_value_to(&self, writer: &mut dyn MessageWriter) {
        writer.write(&self.actual);
    }
}
