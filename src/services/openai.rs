use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::provider::{CompletionProvider, Prompt, ProviderError};
use crate::config::ProviderConfig;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Client for the OpenAI chat-completions API (or any compatible endpoint).
#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    url: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Self {
        let url = format!("{}{COMPLETIONS_PATH}", base_url.trim_end_matches('/'));
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            url,
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(config.api_key.clone(), &config.base_url)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let payload = CompletionRequest {
            model: &prompt.model,
            messages: [
                ApiMessage { role: "system", content: &prompt.system },
                ApiMessage { role: "user", content: &prompt.user },
            ],
            max_tokens: prompt.max_tokens,
        };

        info!(model = prompt.model.as_str(), max_tokens = prompt.max_tokens, "Sending completion request");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let parsed: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        debug!(choices = parsed.choices.len(), "Received completion response");

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::EmptyReply)
    }
}

fn api_error(status: reqwest::StatusCode, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .map(|m| format!("{} {}", status.as_u16(), m))
        .unwrap_or_else(|| format!("{} status code (no body)", status.as_u16()));
    ProviderError::Api { status: status.as_u16(), message }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ApiMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
