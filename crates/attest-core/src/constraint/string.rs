//! String content constraints.

use regex::Regex;

use super::{Constraint, ConstraintResult, Describe};
use crate::error::{AssertResult, AssertionError};
use crate::message::format_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubstringMode {
    Contains,
    StartsWith,
    EndsWith,
}

/// Looks for `expected` inside, at the start of, or at the end of a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringConstraint {
    expected: String,
    mode: SubstringMode,
    ignore_case: bool,
}

impl SubstringConstraint {
    pub fn new(mode: SubstringMode, expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            mode,
            ignore_case: false,
        }
    }

    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    fn matches(&self, actual: &str) -> bool {
        let (actual, expected) = if self.ignore_case {
            (actual.to_lowercase(), self.expected.to_lowercase())
        } else {
            (actual.to_string(), self.expected.clone())
        };
        match self.mode {
            SubstringMode::Contains => actual.contains(&expected),
            SubstringMode::StartsWith => actual.starts_with(&expected),
            SubstringMode::EndsWith => actual.ends_with(&expected),
        }
    }
}

impl Describe for SubstringConstraint {
    fn description(&self) -> String {
        let verb = match self.mode {
            SubstringMode::Contains => "String containing",
            SubstringMode::StartsWith => "String starting with",
            SubstringMode::EndsWith => "String ending with",
        };
        let mut description = format!("{} {}", verb, format_value(&self.expected));
        if self.ignore_case {
            description.push_str(", ignoring case");
        }
        description
    }

    fn display_name(&self) -> String {
        match self.mode {
            SubstringMode::Contains => "Substring",
            SubstringMode::StartsWith => "StartsWith",
            SubstringMode::EndsWith => "EndsWith",
        }
        .to_string()
    }
}

impl<T: AsRef<str> + ?Sized> Constraint<T> for SubstringConstraint {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let actual = actual.as_ref();
        ConstraintResult::new(self, format_value(actual), self.matches(actual))
    }
}

/// Whole-string equality that ignores case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualIgnoringCaseConstraint {
    expected: String,
}

impl EqualIgnoringCaseConstraint {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl Describe for EqualIgnoringCaseConstraint {
    fn description(&self) -> String {
        format!("{}, ignoring case", format_value(&self.expected))
    }

    fn display_name(&self) -> String {
        "Equal".to_string()
    }
}

impl<T: AsRef<str> + ?Sized> Constraint<T> for EqualIgnoringCaseConstraint {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let actual = actual.as_ref();
        if actual.to_lowercase() == self.expected.to_lowercase() {
            ConstraintResult::new(self, format_value(actual), true)
        } else {
            ConstraintResult::string_difference(self, &self.expected, actual, true)
        }
    }
}

/// Satisfied when the regular expression finds a match anywhere in the
/// string. Anchor the pattern with `^...$` to require a full match.
#[derive(Debug, Clone)]
pub struct RegexConstraint {
    regex: Regex,
}

impl RegexConstraint {
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }

    /// Compiles `pattern`. An invalid pattern is a usage error.
    pub fn from_pattern(pattern: &str) -> AssertResult<Self> {
        Regex::new(pattern).map(Self::new).map_err(|err| {
            AssertionError::InvalidArgument(format!("invalid pattern {:?}: {}", pattern, err))
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Describe for RegexConstraint {
    fn description(&self) -> String {
        format!("String matching {}", format_value(self.regex.as_str()))
    }

    fn display_name(&self) -> String {
        "Regex".to_string()
    }
}

impl<T: AsRef<str> + ?Sized> Constraint<T> for RegexConstraint {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let actual = actual.as_ref();
        ConstraintResult::new(self, format_value(actual), self.regex.is_match(actual))
    }
}

resolves_to_self!(
    [] SubstringConstraint,
    [] EqualIgnoringCaseConstraint,
    [] RegexConstraint,
);
