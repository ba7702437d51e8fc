//! Feature key normalization and case-insensitive text matching.
//!
//! Feature keys arrive as UI labels, URL slugs, or already-canonical keys
//! ("No Dealing Desk", "no_dealing_desk", "no-dealing-desk"); all variants
//! must collapse to one canonical lookup key. Normalization is total over
//! strings and idempotent.

/// Canonicalize a raw feature key.
///
/// Lowercases and replaces every run of one-or-more non-alphanumeric
/// (ASCII) characters with a single hyphen. Runs at the string edges
/// become hyphens too, matching the upstream slug convention. Empty input
/// yields the empty string.
pub fn normalize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_separator_run = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            in_separator_run = false;
        } else if !in_separator_run {
            out.push('-');
            in_separator_run = true;
        }
    }
    out
}

/// Case-insensitive substring test against optional source text.
///
/// Absent source short-circuits to false. `needle` is expected lowercase.
pub fn text_contains(source: Option<&str>, needle: &str) -> bool {
    source.is_some_and(|text| text.to_lowercase().contains(needle))
}

/// Case-insensitive substring test against any element of an optional list.
pub fn list_contains(values: Option<&[String]>, needle: &str) -> bool {
    values.is_some_and(|items| {
        items
            .iter()
            .any(|item| item.to_lowercase().contains(needle))
    })
}
