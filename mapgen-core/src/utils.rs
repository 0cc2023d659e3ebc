//! Shared identifier helpers.

/// Longest identifier accepted from user input.
pub const MAX_IDENTIFIER_LEN: usize = 252;

/// Filter user input down to a usable Kotlin identifier fragment.
///
/// Keeps letters, digits, `_` and `$`, and truncates to
/// [`MAX_IDENTIFIER_LEN`] characters.
pub fn filter_identifier(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        .take(MAX_IDENTIFIER_LEN)
        .collect()
}

/// Check whether `s` is a plain (unquoted) identifier
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Last segment of a dotted name (e.g., "a.b.User" -> "User")
pub fn short_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Everything before the last segment of a dotted name (e.g., "a.b.User" -> "a.b")
pub fn package_of(qualified: &str) -> &str {
    qualified.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
}

/// Remove surrounding backticks from a quoted Kotlin identifier
pub fn strip_backticks(name: &str) -> &str {
    name.strip_prefix('`')
        .and_then(|n| n.strip_suffix('`'))
        .unwrap_or(name)
}
