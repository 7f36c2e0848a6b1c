//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, so dispatch
//! is resolved at compile time.

use aibridge_config::Config;
use aibridge_conversation::{ContextWindow, FarewellPhrases, OrchestratorConfig};
use std::time::Duration;

mod history;
mod info;
mod init;
mod talk;
mod version;

pub use history::{HistoryInput, HistoryStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use talk::{TalkInput, TalkStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         // Command logic here
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Translate file settings into the orchestrator's run configuration.
fn build_orchestrator_config(
    config: &Config,
    max_rounds: Option<usize>,
) -> (OrchestratorConfig, FarewellPhrases) {
    let settings = &config.conversation;

    let orchestrator = OrchestratorConfig {
        max_rounds: max_rounds.unwrap_or(settings.max_rounds),
        pacing: Duration::from_secs(settings.pacing_secs),
        context: ContextWindow::new(settings.context_limit),
        greeting_template: settings.greeting_template.clone(),
    };

    (orchestrator, FarewellPhrases::new(&settings.farewell_phrases))
}

/// Show the first and last four characters of a secret.
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk-ant-1234567890"), "sk-a...7890");
        assert_eq!(mask_secret("short"), "***");
    }

    #[test]
    fn test_cli_override_wins_over_config() {
        let config = Config::default();

        let (orchestrator, farewell) = build_orchestrator_config(&config, Some(4));
        assert_eq!(orchestrator.max_rounds, 4);
        assert_eq!(orchestrator.context.limit, 5);
        assert_eq!(orchestrator.pacing, Duration::from_secs(2));
        assert_eq!(farewell.phrases(), ["goodbye", "bye"]);

        let (orchestrator, _) = build_orchestrator_config(&config, None);
        assert_eq!(orchestrator.max_rounds, 10);
    }
}
