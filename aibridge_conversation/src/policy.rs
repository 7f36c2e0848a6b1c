//! Pluggable policies for ending and pacing a conversation.

use async_trait::async_trait;
use std::time::Duration;

/// Decides whether a response ends the conversation.
pub trait TerminationPolicy: Send + Sync {
    fn should_terminate(&self, response: &str) -> bool;
}

impl<F> TerminationPolicy for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn should_terminate(&self, response: &str) -> bool {
        self(response)
    }
}

/// Ends the conversation when a response contains any farewell phrase,
/// compared case-insensitively.
#[derive(Debug, Clone)]
pub struct FarewellPhrases {
    phrases: Vec<String>,
}

impl FarewellPhrases {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl Default for FarewellPhrases {
    fn default() -> Self {
        Self::new(["goodbye", "bye"])
    }
}

impl TerminationPolicy for FarewellPhrases {
    fn should_terminate(&self, response: &str) -> bool {
        let lowered = response.to_lowercase();
        self.phrases.iter().any(|p| lowered.contains(p.as_str()))
    }
}

/// The pause between rounds.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Skips pacing entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

#[async_trait]
impl Pacer for NoPause {
    async fn pause(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farewell_is_case_insensitive() {
        let policy = FarewellPhrases::default();
        assert!(policy.should_terminate("Thanks, GOODBYE!"));
        assert!(policy.should_terminate("ok bye"));
        assert!(!policy.should_terminate("Let's continue with the cache design."));
    }

    #[test]
    fn test_custom_phrases() {
        let policy = FarewellPhrases::new(["До свидания", "пока"]);
        assert!(policy.should_terminate("Спасибо, до свидания!"));
        assert!(policy.should_terminate("ПОКА"));
        assert!(!policy.should_terminate("goodbye"));
    }

    #[test]
    fn test_blank_phrases_are_ignored() {
        let policy = FarewellPhrases::new(["", "  "]);
        assert!(policy.phrases().is_empty());
        assert!(!policy.should_terminate("anything"));
    }

    #[test]
    fn test_closure_policy() {
        let policy = |text: &str| text.ends_with("[done]");
        assert!(policy.should_terminate("all wrapped up [done]"));
        assert!(!policy.should_terminate("still going"));
    }
}
