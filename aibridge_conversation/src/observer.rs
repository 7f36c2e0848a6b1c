//! Hooks for surfacing a running conversation to an operator.

use aibridge_core::Sender;

use crate::orchestrator::ConversationOutcome;

/// Receives progress events from the orchestrator. All methods default to
/// doing nothing.
pub trait ConversationObserver: Send + Sync {
    fn on_start(&self, _topic: &str) {}

    /// `round` is zero-based.
    fn on_round(&self, _round: usize) {}

    fn on_outgoing(&self, _to: Sender, _message: &str) {}

    fn on_response(&self, _from: Sender, _response: &str) {}

    fn on_finish(&self, _outcome: &ConversationOutcome) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl ConversationObserver for SilentObserver {}
