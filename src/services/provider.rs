//! Completion provider seam.
//!
//! The relay only ever talks to a [`CompletionProvider`]; the concrete client is
//! built at startup and injected through the application state.

use async_trait::async_trait;
use thiserror::Error;

/// A fixed two-turn prompt: one system instruction plus the user's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

/// Failures of a single completion call. `Display` is what the caller sees.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("OPENAI_API_KEY is not set; the completion provider is not configured")]
    NotConfigured,
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("{0}")]
    Network(String),
    #[error("Invalid response from completion provider: {0}")]
    InvalidResponse(String),
    #[error("Completion provider returned no reply content")]
    EmptyReply,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Issue exactly one completion call and return the first choice's text.
    async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError>;
}

/// Stand-in used when no credential is available, so the server still starts
/// and every call surfaces as a provider failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredProvider;

#[async_trait]
impl CompletionProvider for UnconfiguredProvider {
    async fn complete(&self, _prompt: &Prompt) -> Result<String, ProviderError> {
        Err(ProviderError::NotConfigured)
    }
}
