use aibridge_core::{AgentClient, BackendError, Sender, error_response};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::http;

const BACKEND: &str = "Claude";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ClaudeMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ClaudeMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// `AgentA`: Anthropic Messages API over plain HTTP.
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
    timeout: Duration,
    project: String,
}

impl ClaudeClient {
    pub fn new(api_key: String, model: String) -> Self {
        info!("Creating ClaudeClient: model={model}");
        Self {
            client: Client::new(),
            api_key,
            model,
            max_tokens: 1000,
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(30),
            project: "a software project".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_project(mut self, project: String) -> Self {
        self.project = project;
        self
    }

    /// Prompt embedding the partner's role and the recent conversation.
    #[must_use]
    pub fn prompt(&self, message: &str, context: &str) -> String {
        let partner = Sender::AgentA.partner();
        let context = if context.is_empty() { "none yet" } else { context };
        format!(
            "You are talking with {partner} AI while working on {}. Previous context: {context}. Question from {partner}: {message}",
            self.project
        )
    }

    async fn try_send(&self, prompt: &str) -> Result<String, BackendError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [ClaudeMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Sending request to Claude API: model={}", self.model);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .timeout(self.timeout)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| http::transport(BACKEND, &e, self.timeout))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(http::status(BACKEND, status, body));
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| http::protocol(BACKEND, e.to_string()))?;

        body["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| http::protocol(BACKEND, "missing content[0].text"))
    }
}

#[async_trait]
impl AgentClient for ClaudeClient {
    fn sender(&self) -> Sender {
        Sender::AgentA
    }

    async fn ask(&self, message: &str, context: &str) -> String {
        let prompt = self.prompt(message, context);
        match self.try_send(&prompt).await {
            Ok(text) => {
                info!("Received response from Claude API");
                text
            }
            Err(e) => {
                error!("Claude request failed: {e}");
                error_response(&e)
            }
        }
    }
}
