use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use super::transport::{HttpRelayTransport, MessengerError, RelayTransport};
use crate::config::{ConfigError, MessengerConfig};
use crate::message::{ChatReply, ChatRequest};

pub const GREETING: &str = "Hello! I'm Manus, your AI assistant. I'm here to help you with information processing, content creation, problem solving, and much more. How can I assist you today?";
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't process your request right now. Please try again later.";

#[derive(Clone, Debug)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub is_bot: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Ignored,
    NotConfigured,
    /// A previous send is still waiting on the relay.
    Busy,
    Replied,
    Failed,
}

/// A relay call started by [`Messenger::begin_send`].
pub struct PendingSend {
    transport: Arc<dyn RelayTransport>,
    request: ChatRequest,
}

impl PendingSend {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    pub async fn dispatch(self) -> Result<ChatReply, MessengerError> {
        self.transport.send(&self.request).await
    }
}

/// Chat-screen state: an append-only message list plus typing and banner flags.
pub struct Messenger {
    transport: Result<Arc<dyn RelayTransport>, ConfigError>,
    messages: Vec<Message>,
    is_typing: bool,
    error: Option<String>,
    last_id: i64,
}

impl Messenger {
    pub fn new(transport: Result<Arc<dyn RelayTransport>, ConfigError>) -> Self {
        let greeting = Message {
            id: "1".to_string(),
            text: GREETING.to_string(),
            is_bot: true,
            timestamp: Utc::now(),
        };
        Self {
            transport,
            messages: vec![greeting],
            is_typing: false,
            error: None,
            last_id: 1,
        }
    }

    pub fn from_config(config: Result<MessengerConfig, ConfigError>) -> Self {
        Self::new(config.map(|c| Arc::new(HttpRelayTransport::new(c)) as Arc<dyn RelayTransport>))
    }

    pub fn from_env() -> Self {
        Self::from_config(MessengerConfig::from_env())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    /// Banner text for the last failure, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_ok()
    }

    /// Sends one message and waits for the relay. Equivalent to
    /// [`begin_send`](Self::begin_send), [`PendingSend::dispatch`] and
    /// [`complete_send`](Self::complete_send) in sequence.
    pub async fn send(&mut self, input: &str) -> SendOutcome {
        match self.begin_send(input) {
            Ok(pending) => {
                let result = pending.dispatch().await;
                self.complete_send(result)
            }
            Err(outcome) => outcome,
        }
    }

    /// Appends the user's message and marks the messenger as typing. The
    /// returned request owns everything it needs, so the caller can keep
    /// reading state while it is in flight.
    pub fn begin_send(&mut self, input: &str) -> Result<PendingSend, SendOutcome> {
        let transport = match &self.transport {
            Ok(t) => Arc::clone(t),
            Err(e) => {
                error!(error = %e, "Messenger is not configured");
                self.error = Some(e.to_string());
                return Err(SendOutcome::NotConfigured);
            }
        };
        if self.is_typing {
            return Err(SendOutcome::Busy);
        }
        let text = input.trim();
        if text.is_empty() {
            return Err(SendOutcome::Ignored);
        }

        self.error = None;
        self.push(text.to_string(), false);
        self.is_typing = true;

        Ok(PendingSend { transport, request: ChatRequest::new(text) })
    }

    pub fn complete_send(&mut self, result: Result<ChatReply, MessengerError>) -> SendOutcome {
        let outcome = match result {
            Ok(reply) => {
                info!(reply_len = reply.reply.len(), "Received reply");
                self.push(reply.reply, true);
                SendOutcome::Replied
            }
            Err(e) => {
                error!(error = %e, "Error calling chat relay");
                self.error = Some(format!("Failed to get AI response: {e}"));
                self.push(FALLBACK_REPLY.to_string(), true);
                SendOutcome::Failed
            }
        };

        self.is_typing = false;
        outcome
    }

    fn push(&mut self, text: String, is_bot: bool) {
        let timestamp = Utc::now();
        let id = timestamp.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        self.messages.push(Message { id: id.to_string(), text, is_bot, timestamp });
    }
}
