//! Compact digest of recent turns used to prime each request.

use aibridge_core::{Turn, truncate_chars};

/// Separator between rendered turns.
pub const CONTEXT_SEPARATOR: &str = " | ";

/// Marker appended to every rendered message.
pub const TRUNCATION_MARKER: &str = "...";

/// Render the last `limit` turns as `"{sender}: {message prefix}..."` lines
/// joined with [`CONTEXT_SEPARATOR`]. Message prefixes are capped at 100
/// characters.
#[must_use]
pub fn recent_context(turns: &[Turn], limit: usize) -> String {
    ContextWindow::new(limit).render(turns)
}

/// Configuration for how much history goes into a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow {
    /// Number of most recent turns to include
    pub limit: usize,
    /// Maximum characters kept from each message
    pub max_message_chars: usize,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            limit: 5,
            max_message_chars: 100,
        }
    }
}

impl ContextWindow {
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            limit,
            max_message_chars: 100,
        }
    }

    /// Turns that fall inside the window, oldest first.
    #[must_use]
    pub fn select<'a>(&self, turns: &'a [Turn]) -> &'a [Turn] {
        let start = turns.len().saturating_sub(self.limit);
        &turns[start..]
    }

    #[must_use]
    pub fn render(&self, turns: &[Turn]) -> String {
        self.select(turns)
            .iter()
            .map(|turn| {
                format!(
                    "{}: {}{TRUNCATION_MARKER}",
                    turn.sender,
                    truncate_chars(&turn.message, self.max_message_chars)
                )
            })
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR)
    }
}
