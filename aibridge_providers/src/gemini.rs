use aibridge_core::{AgentClient, BackendError, Sender, error_response};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::http;

const BACKEND: &str = "Gemini";

/// `AgentB`: a managed Gemini client bound to one API key and model.
///
/// Each call sends a single text prompt to `generateContent` and returns
/// the first candidate's text.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    project: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        info!("Creating GeminiClient: model={model}");
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(60),
            project: "a software project".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
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

    #[must_use]
    pub fn prompt(&self, message: &str, context: &str) -> String {
        let partner = Sender::AgentB.partner();
        let context = if context.is_empty() { "none yet" } else { context };
        format!(
            "You are talking with {partner} AI while working on {}. Context: {context}. Message from {partner}: {message}",
            self.project
        )
    }

    /// Send one prompt and return the generated text.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, BackendError> {
        debug!("Sending request to Gemini API: model={}", self.model);

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .timeout(self.timeout)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
            }))
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

        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                let reason = body["promptFeedback"]["blockReason"]
                    .as_str()
                    .map_or_else(
                        || "missing candidates[0].content.parts[0].text".to_string(),
                        |r| format!("prompt blocked: {r}"),
                    );
                http::protocol(BACKEND, reason)
            })?;

        Ok(text.to_string())
    }
}

#[async_trait]
impl AgentClient for GeminiClient {
    fn sender(&self) -> Sender {
        Sender::AgentB
    }

    async fn ask(&self, message: &str, context: &str) -> String {
        let prompt = self.prompt(message, context);
        match self.generate_content(&prompt).await {
            Ok(text) => {
                info!("Received response from Gemini API");
                text
            }
            Err(e) => {
                error!("Gemini request failed: {e}");
                error_response(&e)
            }
        }
    }
}
