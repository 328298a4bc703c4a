//! Tests for message rendering.

use super::utils::{
    clip_expected_and_actual, clip_string, find_mismatch_position, unescape_literal,
};
use super::*;
use crate::constraint::Constraint;
use crate::dsl::is;

#[test]
fn test_mismatch_position() {
    assert_eq!(find_mismatch_position("hello", "help", false), Some(3));
    assert_eq!(find_mismatch_position("abc", "abcd", false), Some(3));
    assert_eq!(find_mismatch_position("abc", "abc", false), None);
    assert_eq!(find_mismatch_position("ABC", "abc", true), None);
}

#[test]
fn test_clip_string() {
    assert_eq!(clip_string("abcdefghij", 6, 0), "abc...");
    assert_eq!(clip_string("abcdefghij", 20, 4), "...efghij");
}

#[test]
fn test_clipping_keeps_mismatch_visible() {
    let expected = format!("{}X{}", "a".repeat(60), "b".repeat(60));
    let actual = format!("{}Y{}", "a".repeat(60), "b".repeat(60));
    let (e, a) = clip_expected_and_actual(&expected, &actual, 40, 60);
    assert!(e.starts_with("...") && e.ends_with("..."));
    assert!(e.contains('X'));
    assert!(a.contains('Y'));
    assert!(e.chars().count() <= 40);
}

#[test]
fn test_standard_layout() {
    let result = is::greater_than(10).apply_to(&5);
    let text = MessageFormatter::new("Assert::that").format(
        Message::default(),
        &CallSite::unknown(),
        &result,
    );
    assert_eq!(text, "  Expected: greater than 10\n  But was:  5");
}

#[test]
fn test_uncaptured_call_site_has_no_expression_line() {
    let result = is::equal_to(2).apply_to(&1);
    let text = MessageFormatter::new("Assert::that").format(
        Message::from("totals"),
        &CallSite::unknown(),
        &result,
    );
    assert_eq!(text, "totals\n  Expected: 2\n  But was:  1");
    assert!(!text.contains("Assert::that("));
}

#[test]
fn test_user_message_and_call_site() {
    let result = is::greater_than(10).apply_to(&5);
    let site = CallSite::new("5", "is::greater_than(10)");
    let text = MessageFormatter::new("Assert::that").format(
        Message::from("counting widgets"),
        &site,
        &result,
    );
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "counting widgets",
            "Assert::that(5, is::greater_than(10))",
            "  Expected: greater than 10",
            "  But was:  5",
        ]
    );
}

#[test]
fn test_empty_user_message_is_omitted() {
    let result = is::true_().apply_to(&false);
    let text = MessageFormatter::new("Assert::that").format(
        Message::from(""),
        &CallSite::unknown(),
        &result,
    );
    assert!(text.starts_with("  Expected: True"));
}

#[test]
fn test_lazy_message_runs_only_when_formatting() {
    use std::cell::Cell;

    let calls = Cell::new(0);
    let message = Message::lazy(|| {
        calls.set(calls.get() + 1);
        format!("attempt {}", 3)
    });
    assert_eq!(calls.get(), 0);

    let result = is::true_().apply_to(&false);
    let text = MessageFormatter::new("Assert::that").format(message, &CallSite::unknown(), &result);
    assert_eq!(calls.get(), 1);
    assert!(text.starts_with("attempt 3\n"));
}

#[test]
fn test_string_difference_has_caret() {
    let result = is::equal_to("hello").apply_to(&"help");
    let text =
        MessageFormatter::new("Assert::that").format(Message::Empty, &CallSite::unknown(), &result);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "  Expected string length 5 but was 4. Strings differ at index 3.",
            "  Expected: \"hello\"",
            "  But was:  \"help\"",
            "  --------------^",
        ]
    );
}

#[test]
fn test_string_difference_counts_raw_characters() {
    let result = is::equal_to("a\nb").apply_to(&"a\nbc");
    let text =
        MessageFormatter::new("Assert::that").format(Message::Empty, &CallSite::unknown(), &result);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "  Expected string length 3 but was 4. Strings differ at index 3.",
            "  Expected: \"a\\nb\"",
            "  But was:  \"a\\nbc\"",
            "  ---------------^",
        ]
    );
}

#[test]
fn test_unescape_literal() {
    assert_eq!(unescape_literal(r"a\nb\t\\").as_deref(), Some("a\nb\t\\"));
    assert_eq!(unescape_literal(r#"say \"hi\""#).as_deref(), Some("say \"hi\""));
    assert_eq!(unescape_literal(r"\u{1b}").as_deref(), Some("\u{1b}"));
    assert_eq!(unescape_literal(r"bad \q"), None);
}

#[test]
fn test_long_strings_are_clipped() {
    let expected = "x".repeat(200);
    let mut actual = expected.clone();
    actual.replace_range(150..151, "y");
    let result = is::equal_to(expected.clone()).apply_to(&actual);
    let text = MessageFormatter::new("Assert::that")
        .with_max_line_length(60)
        .format(Message::Empty, &CallSite::unknown(), &result);

    for line in text.lines().skip(1) {
        assert!(line.chars().count() <= 62, "line too long: {}", line);
    }
    assert!(text.contains("..."));
}

#[test]
fn test_text_writer_indents_by_level() {
    let mut writer = TextMessageWriter::new();
    writer.write_message_line(0, "top");
    writer.write_message_line(2, "nested");
    assert_eq!(writer.into_string(), "top\n    nested");
}

#[test]
fn test_call_site_location() {
    let site = CallSite::unknown().here();
    let text = site.location_text().unwrap();
    assert!(text.starts_with(file!()));
    assert_eq!(site.expressions(), None);
}
