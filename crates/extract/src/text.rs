// ABOUTME: Small text helpers shared by the parsers.
// ABOUTME: Whitespace collapsing, comma-list splitting, and count parsing ("1,234 jobs").

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d,]+").unwrap());

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses the first run of digits (thousands commas allowed) in `text`.
///
/// Returns `None` when there is no digit in the text. A run made only of
/// commas is skipped.
pub fn parse_number(text: &str) -> Option<u64> {
    NUMBER_RE
        .find_iter(text)
        .map(|m| m.as_str().replace(',', ""))
        .find(|digits| !digits.is_empty())
        .and_then(|digits| digits.parse().ok())
}

/// Splits a comma-separated value into trimmed, non-empty parts, preserving order.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
