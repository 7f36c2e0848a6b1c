use aibridge_config::{CLAUDE_API_KEY_ENV, Config, GEMINI_API_KEY_ENV};
use aibridge_transcript::TranscriptStore;

use super::mask_secret;

/// Strategy for displaying configuration information.
///
/// This strategy outputs:
/// - API keys (masked) and where to set them
/// - Backend models and endpoints
/// - Conversation settings
/// - Storage paths and transcript status
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = Config;

    async fn execute(&self, config: Self::Input) -> anyhow::Result<()> {
        println!("=== aibridge Configuration ===\n");

        println!("Config file: {}", Config::config_path().display());
        println!();

        println!("API Keys:");
        print_key("Claude", &config.agents.claude.api_key(), CLAUDE_API_KEY_ENV);
        print_key("Gemini", &config.agents.gemini.api_key(), GEMINI_API_KEY_ENV);
        println!();

        let claude = &config.agents.claude;
        println!("Claude (agent A):");
        println!("  Model: {}", claude.model);
        println!("  Max Tokens: {}", claude.max_tokens);
        println!("  Endpoint: {}", claude.base_url);
        println!("  Timeout: {}s", claude.timeout_secs);
        println!();

        let gemini = &config.agents.gemini;
        println!("Gemini (agent B):");
        println!("  Model: {}", gemini.model);
        println!("  Endpoint: {}", gemini.base_url);
        println!("  Timeout: {}s", gemini.timeout_secs);
        println!();

        let settings = &config.conversation;
        println!("Conversation:");
        println!("  Max Rounds: {}", settings.max_rounds);
        println!("  Context Limit: {}", settings.context_limit);
        println!("  Pacing: {}s", settings.pacing_secs);
        println!("  Project: {}", settings.project);
        println!("  Default Topic: {}", settings.default_topic);
        println!("  Farewell Phrases: {}", settings.farewell_phrases.join(", "));
        println!();

        let transcript_path = config.storage.transcript_path();
        println!("Storage:");
        println!("  Transcript: {}", transcript_path.display());
        match TranscriptStore::load(&transcript_path) {
            Ok(turns) => println!("  Status: {} turns recorded", turns.len()),
            Err(e) => println!("  Status: unreadable ({e})"),
        }
        println!("  Log File: {}", config.storage.log_path().display());

        Ok(())
    }
}

fn print_key(name: &str, key: &str, env_var: &str) {
    if Config::is_placeholder_key(key) {
        println!("  {name}: (not set - export {env_var})");
    } else {
        println!("  {name}: {}", mask_secret(key));
    }
}
