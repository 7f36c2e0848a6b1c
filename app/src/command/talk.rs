use aibridge_config::Config;
use aibridge_conversation::{ConversationOrchestrator, NoPause, Pacer, TokioPacer};
use aibridge_providers::{ClaudeClient, GeminiClient};
use aibridge_transcript::TranscriptStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::build_orchestrator_config;
use crate::console::ConsoleObserver;

/// Input parameters for the Talk command strategy.
#[derive(Debug, Clone)]
pub struct TalkInput {
    /// Topic words; joined with spaces, default topic when empty
    pub topic: Vec<String>,
    /// Optional round limit override
    pub max_rounds: Option<usize>,
    /// Skip the pause between rounds
    pub no_pause: bool,
    /// Effective configuration
    pub config: Config,
    /// Where the log file lives, for the closing summary
    pub log_path: PathBuf,
}

/// Strategy for running one Claude ↔ Gemini conversation.
///
/// - Builds both backend clients from config and environment
/// - Opens the transcript (empty on missing or corrupt file)
/// - Drives the orchestrator with console output
#[derive(Debug, Clone, Copy)]
pub struct TalkStrategy;

impl super::CommandStrategy for TalkStrategy {
    type Input = TalkInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = input.config;
        let settings = &config.conversation;

        let topic = if input.topic.is_empty() {
            settings.default_topic.clone()
        } else {
            input.topic.join(" ")
        };

        let claude = &config.agents.claude;
        let claude_key = claude.api_key();
        if Config::is_placeholder_key(&claude_key) {
            warn!("No Claude API key configured; requests will be rejected");
        }
        let agent_a = ClaudeClient::new(claude_key, claude.model.clone())
            .with_base_url(claude.base_url.clone())
            .with_max_tokens(claude.max_tokens)
            .with_timeout(Duration::from_secs(claude.timeout_secs))
            .with_project(settings.project.clone());

        let gemini = &config.agents.gemini;
        let gemini_key = gemini.api_key();
        if Config::is_placeholder_key(&gemini_key) {
            warn!("No Gemini API key configured; requests will be rejected");
        }
        let agent_b = GeminiClient::new(gemini_key, gemini.model.clone())
            .with_base_url(gemini.base_url.clone())
            .with_timeout(Duration::from_secs(gemini.timeout_secs))
            .with_project(settings.project.clone());

        let transcript_path = config.storage.transcript_path();
        info!("Transcript path: {}", transcript_path.display());
        let mut store = TranscriptStore::open(transcript_path);

        let (orchestrator_config, farewell) =
            build_orchestrator_config(&config, input.max_rounds);

        let pacer: Arc<dyn Pacer> = if input.no_pause {
            Arc::new(NoPause)
        } else {
            Arc::new(TokioPacer)
        };

        ConversationOrchestrator::new(Arc::new(agent_a), Arc::new(agent_b), &mut store)
            .with_config(orchestrator_config)
            .with_termination(farewell)
            .with_pacer(pacer)
            .with_observer(Arc::new(ConsoleObserver))
            .run(&topic)
            .await;

        println!("\n📊 Transcript saved to {}", store.path().display());
        println!("📝 Logs in {}", input.log_path.display());

        Ok(())
    }
}
