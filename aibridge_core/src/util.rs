//! Text helpers shared by the clients and the context window.

/// Marks a response that came from a failed backend call.
pub const ERROR_PREFIX: &str = "Error:";

/// Render a failure as conversation text.
#[must_use]
pub fn error_response(err: &impl std::fmt::Display) -> String {
    format!("{ERROR_PREFIX} {err}")
}

#[must_use]
pub fn is_error_response(text: &str) -> bool {
    text.starts_with(ERROR_PREFIX)
}

/// First `max_chars` characters of `s`, never splitting a code point.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
