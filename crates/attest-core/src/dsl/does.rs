//! Substring and pattern constraints.

use crate::constraint::{RegexConstraint, SubstringConstraint, SubstringMode};
use crate::error::AssertResult;

pub fn contain(expected: impl Into<String>) -> SubstringConstraint {
    SubstringConstraint::new(SubstringMode::Contains, expected)
}

pub fn start_with(expected: impl Into<String>) -> SubstringConstraint {
    SubstringConstraint::new(SubstringMode::StartsWith, expected)
}

pub fn end_with(expected: impl Into<String>) -> SubstringConstraint {
    SubstringConstraint::new(SubstringMode::EndsWith, expected)
}

/// `does::match_regex(r"^\d{4}-\d{2}$")?`. An invalid pattern returns
/// `InvalidArgument`.
pub fn match_regex(pattern: &str) -> AssertResult<RegexConstraint> {
    RegexConstraint::from_pattern(pattern)
}
