use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const CLAUDE_API_KEY_ENV: &str = "CLAUDE_API_KEY";
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

const CLAUDE_KEY_PLACEHOLDER: &str = "your-claude-key-here";
const GEMINI_KEY_PLACEHOLDER: &str = "your-gemini-key-here";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub conversation: ConversationSettings,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AgentsConfig {
    #[serde(default)]
    pub claude: ClaudeConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClaudeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "ClaudeConfig::default_model")]
    pub model: String,
    #[serde(default = "ClaudeConfig::default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "ClaudeConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ClaudeConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: Self::default_model(),
            max_tokens: Self::default_max_tokens(),
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl ClaudeConfig {
    fn default_model() -> String {
        "claude-3-5-sonnet-20241022".to_string()
    }

    const fn default_max_tokens() -> u32 {
        1000
    }

    fn default_base_url() -> String {
        "https://api.anthropic.com".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        30
    }

    /// Key from `CLAUDE_API_KEY`, then the config file, then a placeholder.
    #[must_use]
    pub fn api_key(&self) -> String {
        Config::resolve_api_key(
            std::env::var(CLAUDE_API_KEY_ENV).ok(),
            self.api_key.as_deref(),
            CLAUDE_KEY_PLACEHOLDER,
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeminiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "GeminiConfig::default_model")]
    pub model: String,
    #[serde(default = "GeminiConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "GeminiConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: Self::default_model(),
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    fn default_model() -> String {
        "gemini-1.5-pro".to_string()
    }

    fn default_base_url() -> String {
        "https://generativelanguage.googleapis.com".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        60
    }

    /// Key from `GEMINI_API_KEY`, then the config file, then a placeholder.
    #[must_use]
    pub fn api_key(&self) -> String {
        Config::resolve_api_key(
            std::env::var(GEMINI_API_KEY_ENV).ok(),
            self.api_key.as_deref(),
            GEMINI_KEY_PLACEHOLDER,
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConversationSettings {
    #[serde(default = "ConversationSettings::default_max_rounds")]
    pub max_rounds: usize,
    #[serde(default = "ConversationSettings::default_context_limit")]
    pub context_limit: usize,
    #[serde(default = "ConversationSettings::default_pacing_secs")]
    pub pacing_secs: u64,
    /// What the agents are told they are working on.
    #[serde(default = "ConversationSettings::default_project")]
    pub project: String,
    #[serde(default = "ConversationSettings::default_topic")]
    pub default_topic: String,
    /// Seed message; `{topic}` is replaced with the chosen topic.
    #[serde(default = "ConversationSettings::default_greeting_template")]
    pub greeting_template: String,
    /// Case-insensitive substrings that end the conversation.
    #[serde(default = "ConversationSettings::default_farewell_phrases")]
    pub farewell_phrases: Vec<String>,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            max_rounds: Self::default_max_rounds(),
            context_limit: Self::default_context_limit(),
            pacing_secs: Self::default_pacing_secs(),
            project: Self::default_project(),
            default_topic: Self::default_topic(),
            greeting_template: Self::default_greeting_template(),
            farewell_phrases: Self::default_farewell_phrases(),
        }
    }
}

impl ConversationSettings {
    const fn default_max_rounds() -> usize {
        10
    }

    const fn default_context_limit() -> usize {
        5
    }

    const fn default_pacing_secs() -> u64 {
        2
    }

    fn default_project() -> String {
        "a software project".to_string()
    }

    fn default_topic() -> String {
        "architecture review and next development steps".to_string()
    }

    fn default_greeting_template() -> String {
        "Hi! Let's discuss how the project is going. Current topic: {topic}".to_string()
    }

    fn default_farewell_phrases() -> Vec<String> {
        vec!["goodbye".to_string(), "bye".to_string()]
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}

impl StorageConfig {
    #[must_use]
    pub fn transcript_path(&self) -> PathBuf {
        self.transcript_path
            .clone()
            .unwrap_or_else(|| Config::base_dir().join("logs").join("ai-conversation.json"))
    }

    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| Config::base_dir().join("logs").join("ai-chat.log"))
    }
}

impl Config {
    /// `~/aibridge`, or `./aibridge` when no home directory is known.
    #[must_use]
    pub fn base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aibridge")
    }

    #[must_use]
    pub fn config_path() -> PathBuf {
        Self::base_dir().join("config.json")
    }

    /// Load `~/aibridge/config.json`, or defaults when it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Invalid config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }

    /// Credential precedence: environment, then config file, then placeholder.
    /// Blank values count as absent.
    #[must_use]
    pub fn resolve_api_key(env: Option<String>, file: Option<&str>, placeholder: &str) -> String {
        env.filter(|k| !k.trim().is_empty())
            .or_else(|| file.filter(|k| !k.trim().is_empty()).map(str::to_string))
            .unwrap_or_else(|| placeholder.to_string())
    }

    /// Whether a resolved key is still the placeholder.
    #[must_use]
    pub fn is_placeholder_key(key: &str) -> bool {
        key == CLAUDE_KEY_PLACEHOLDER || key == GEMINI_KEY_PLACEHOLDER
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::base_dir();
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        Self::ensure_config_dir()?;
        let config_path = Self::config_path();

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, Self::template()?)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Export {CLAUDE_API_KEY_ENV} and {GEMINI_API_KEY_ENV}");
        println!("      (or set agents.*.api_key in the config file)");
        println!("   2. Run 'aibridge <topic>' to start a conversation");
        println!();
        println!("🔧 Configuration options:");
        println!("   - conversation.max_rounds: Upper bound on exchanged messages");
        println!("   - conversation.farewell_phrases: Phrases that end the conversation early");
        println!("   - storage.transcript_path: Where the JSON transcript is kept");
        println!();
        Ok(())
    }

    /// The default configuration rendered as pretty JSON.
    pub fn template() -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&Self::default())?)
    }
}
