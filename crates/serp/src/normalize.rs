// ABOUTME: Text normalization for extracted fragments and heading-to-key conversion.
// ABOUTME: clean() collapses whitespace and keeps printable ASCII only; normalize_dict_key() builds field names.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Text is reduced to printable ASCII before splitting; anything outside it
/// (accents, symbols, no-break spaces, zero-width marks) is dropped, not
/// replaced. ASCII whitespace survives so it can still separate words.
fn is_representable(c: char) -> bool {
    c.is_ascii() && (!c.is_ascii_control() || c.is_whitespace())
}

/// Cleans an extracted text fragment.
///
/// Drops characters outside printable ASCII, trims the ends and collapses
/// every internal whitespace run (newlines and tabs included) to a single
/// space. Idempotent: `clean(&clean(x)) == clean(x)`.
pub fn clean(text: &str) -> String {
    let ascii: String = text.chars().filter(|&c| is_representable(c)).collect();
    ascii.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`clean`] for fragments that may be missing; absent input yields `""`.
pub fn clean_opt<S: AsRef<str>>(text: Option<S>) -> String {
    text.map(|t| clean(t.as_ref())).unwrap_or_default()
}

/// Converts a free-text heading into a stable field name.
///
/// Lowercases, replaces whitespace runs with `_`, removes colons and trims
/// leading/trailing underscores. Total: any input yields a key, possibly empty.
pub fn normalize_dict_key(text: &str) -> String {
    let lowered = text.to_lowercase();
    let joined = WHITESPACE_RUN.replace_all(&lowered, "_");
    joined.replace(':', "").trim_matches('_').to_string()
}
