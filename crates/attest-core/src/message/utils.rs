//! Value rendering and string clipping helpers.

use std::fmt::Debug;

/// Marker inserted where a clipped string was shortened.
pub const ELLIPSIS: &str = "...";

/// Renders a value the way it appears in `Expected:` / `But was:` lines.
pub fn format_value<T: Debug + ?Sized>(value: &T) -> String {
    format!("{:?}", value)
}

/// Returns the inner text of a rendered string literal (`"abc"` -> `abc`).
pub fn as_string_literal(rendered: &str) -> Option<&str> {
    if rendered.len() >= 2 && rendered.starts_with('"') && rendered.ends_with('"') {
        Some(&rendered[1..rendered.len() - 1])
    } else {
        None
    }
}

/// Reverses the escaping `Debug` applies inside a string literal, turning
/// `a\nb` back into a two-line string. `None` for malformed escapes.
pub fn unescape_literal(escaped: &str) -> Option<String> {
    let mut raw = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            raw.push(c);
            continue;
        }
        let unescaped = match chars.next()? {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '0' => '\0',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            'u' => {
                if chars.next()? != '{' {
                    return None;
                }
                let hex: String = chars.by_ref().take_while(|&c| c != '}').collect();
                char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?
            }
            _ => return None,
        };
        raw.push(unescaped);
    }
    Some(raw)
}

/// Escapes control characters for display, the way `Debug` does, without
/// the surrounding quotes.
pub fn escape_control_chars(text: &str) -> String {
    let rendered = format_value(text);
    as_string_literal(&rendered)
        .map(str::to_string)
        .unwrap_or(rendered)
}

/// Index of the first character at which the two strings differ.
///
/// When one string is a prefix of the other the mismatch is at the end of
/// the shorter one. Equal strings have no mismatch.
pub fn find_mismatch_position(expected: &str, actual: &str, ignore_case: bool) -> Option<usize> {
    let fold = |c: char| {
        if ignore_case {
            c.to_lowercase().next().unwrap_or(c)
        } else {
            c
        }
    };

    let mut expected_chars = expected.chars().map(fold);
    let mut actual_chars = actual.chars().map(fold);
    let mut index = 0;
    loop {
        match (expected_chars.next(), actual_chars.next()) {
            (None, None) => return None,
            (Some(e), Some(a)) if e == a => index += 1,
            _ => return Some(index),
        }
    }
}

/// Clips `text` to at most `max_length` characters starting at `clip_start`,
/// marking removed portions with [`ELLIPSIS`].
pub fn clip_string(text: &str, max_length: usize, clip_start: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut clip_length = max_length;
    let mut clipped = String::new();

    if clip_start > 0 {
        clip_length = clip_length.saturating_sub(ELLIPSIS.len());
        clipped.push_str(ELLIPSIS);
    }

    let start = clip_start.min(chars.len());
    if chars.len() - start > clip_length {
        clip_length = clip_length.saturating_sub(ELLIPSIS.len());
        clipped.extend(&chars[start..start + clip_length]);
        clipped.push_str(ELLIPSIS);
    } else {
        clipped.extend(&chars[start..]);
    }

    clipped
}

/// Clips both strings so the mismatch stays visible within `max_display_length`.
///
/// Returns the clipped pair; strings that already fit are returned unchanged.
pub fn clip_expected_and_actual(
    expected: &str,
    actual: &str,
    max_display_length: usize,
    mismatch: usize,
) -> (String, String) {
    let longest = expected.chars().count().max(actual.chars().count());
    if longest <= max_display_length {
        return (expected.to_string(), actual.to_string());
    }

    let clip_length = max_display_length.saturating_sub(ELLIPSIS.len());
    let mut clip_start = longest.saturating_sub(clip_length);
    if clip_start > mismatch {
        clip_start = mismatch.saturating_sub(clip_length / 2);
    }

    (
        clip_string(expected, max_display_length, clip_start),
        clip_string(actual, max_display_length, clip_start),
    )
}
