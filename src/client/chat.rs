use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use crate::client::{CompletionClient, CompletionParams};
use crate::config::Settings;
use crate::error::{GenerationError, preview};

/// Longest upstream body kept in an error.
const BODY_PREVIEW: usize = 500;

/// Adapter for an OpenAI-compatible chat-completions endpoint.
pub struct ChatCompletionClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl fmt::Debug for ChatCompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionClient")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

impl ChatCompletionClient {
    /// Fails with `Configuration` when no plausible credential is set, so callers
    /// never attempt a call that is bound to be rejected.
    pub fn from_settings(settings: &Settings) -> Result<Self, GenerationError> {
        let api_key = settings.credential().ok_or_else(|| {
            GenerationError::Configuration("completion API key is missing or too short".to_string())
        })?;
        let timeout = settings.request_timeout();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: settings.completions_url(),
            api_key: api_key.to_string(),
            model: settings.model.clone(),
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn transport_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else {
            GenerationError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    fn name(&self) -> &str {
        "chat-completions"
    }

    async fn complete(&self, prompt: &str, params: &CompletionParams) -> Result<String, GenerationError> {
        let body = json!({
            "model": &self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
            "top_p": params.top_p,
        });

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        debug!(status = status.as_u16(), bytes = text.len(), "Completion response received");

        if !status.is_success() {
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body: preview(&text, BODY_PREVIEW),
            });
        }

        let parsed: ApiResponse = serde_json::from_str(&text).map_err(|e| GenerationError::Upstream {
            status: status.as_u16(),
            body: format!("undecodable response ({}): {}", e, preview(&text, BODY_PREVIEW)),
        })?;

        let choice = parsed.choices.into_iter().next().ok_or_else(|| GenerationError::Upstream {
            status: status.as_u16(),
            body: "response contained no choices".to_string(),
        })?;

        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(GenerationError::Upstream {
                status: status.as_u16(),
                body: "first choice has empty content".to_string(),
            }),
        }
    }
}
