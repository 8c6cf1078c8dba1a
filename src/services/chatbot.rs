use tracing::debug;

use super::provider::{CompletionProvider, Prompt, ProviderError};
use crate::error::AppError;

pub const SYSTEM_PROMPT: &str = "You are Manus, an AI assistant. Be helpful and concise.";
pub const MODEL: &str = "gpt-4.1-nano";
pub const MAX_TOKENS: u32 = 250;

pub fn build_prompt(user_msg: &str) -> Prompt {
    Prompt {
        model: MODEL.to_string(),
        system: SYSTEM_PROMPT.to_string(),
        user: user_msg.to_string(),
        max_tokens: MAX_TOKENS,
    }
}

/// One provider call per message. No retry.
pub async fn generate_reply(
    provider: &dyn CompletionProvider,
    user_msg: &str,
) -> Result<String, AppError> {
    let prompt = build_prompt(user_msg);
    let reply = provider.complete(&prompt).await?;
    if reply.is_empty() {
        return Err(ProviderError::EmptyReply.into());
    }
    debug!(reply_len = reply.len(), "Generated reply");
    Ok(reply)
}
