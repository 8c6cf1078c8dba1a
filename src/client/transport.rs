use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::MessengerConfig;
use crate::message::{ChatError, ChatReply, ChatRequest};

pub const INVALID_RESPONSE: &str = "Invalid response from AI.";

#[derive(Debug, Error)]
pub enum MessengerError {
    #[error("{message}")]
    Relay { status: u16, message: String },
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    InvalidResponse(String),
}

/// How the messenger reaches the relay.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, MessengerError>;
}

pub struct HttpRelayTransport {
    http: Client,
    config: MessengerConfig,
}

impl HttpRelayTransport {
    pub fn new(config: MessengerConfig) -> Self {
        Self { http: Client::new(), config }
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, MessengerError> {
        let response = self
            .http
            .post(&self.config.relay_url)
            .bearer_auth(&self.config.api_key)
            .header("apikey", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| MessengerError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| MessengerError::Network(e.without_url().to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Relay responded");

        if !status.is_success() {
            let message = serde_json::from_slice::<ChatError>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("relay returned status {status}"));
            return Err(MessengerError::Relay { status: status.as_u16(), message });
        }

        match serde_json::from_slice::<ChatReply>(&body) {
            Ok(reply) if !reply.reply.is_empty() => Ok(reply),
            _ => Err(MessengerError::InvalidResponse(INVALID_RESPONSE.to_string())),
        }
    }
}
