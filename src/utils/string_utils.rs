/// Pure string predicates and trimming helpers

/// Remove `prefix` from the start of `text` if present, otherwise return `text` unchanged
pub fn drop_prefix<'a>(text: &'a str, prefix: &str) -> &'a str {
    text.strip_prefix(prefix).unwrap_or(text)
}

/// Remove `suffix` from the end of `text` if present, otherwise return `text` unchanged
pub fn drop_suffix<'a>(text: &'a str, suffix: &str) -> &'a str {
    text.strip_suffix(suffix).unwrap_or(text)
}

/// Check whether `text` starts with `prefix`
///
/// With `case_sensitive` off, both sides are lowercased with the same Unicode
/// case mapping before comparing.
pub fn has_prefix(text: &str, prefix: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        text.starts_with(prefix)
    } else {
        text.to_lowercase().starts_with(&prefix.to_lowercase())
    }
}

/// Check whether `text` ends with `suffix`, optionally ignoring case
pub fn has_suffix(text: &str, suffix: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        text.ends_with(suffix)
    } else {
        text.to_lowercase().ends_with(&suffix.to_lowercase())
    }
}

/// Check that a string is non-empty and made only of numeric characters
///
/// Any character in the Unicode Nd, Nl or No categories counts, not just
/// ASCII digits. Signs, decimal points and exponents are rejected: `"-5"` and
/// `"1.5"` are not numeric. Han numerals such as `一` are letters (Lo) and are
/// also rejected, unlike classifiers that consult the Unihan numeric tables.
pub fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_numeric)
}

/// Strip whitespace and line terminators from both ends
pub fn trimmed_string(text: &str) -> &str {
    text.trim()
}
