// src/message.rs
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const MESSAGE_REQUIRED: &str = "Message is required";

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatError {
    pub error: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()) }
    }

    /// Strict decode of a raw request body into the user's message.
    pub fn decode(body: &[u8]) -> Result<String, AppError> {
        let request: ChatRequest = serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;
        request.into_message()
    }

    pub fn into_message(self) -> Result<String, AppError> {
        match self.message {
            Some(m) if !m.is_empty() => Ok(m),
            _ => Err(AppError::BadRequest(MESSAGE_REQUIRED.to_string())),
        }
    }
}
