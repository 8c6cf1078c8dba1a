use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::Method,
};
use tracing::info;

use crate::{
    error::AppError,
    message::{ChatReply, ChatRequest},
    services::chatbot::generate_reply,
    state::SharedState,
};

pub async fn chat_handler(
    method: Method,
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatReply>, AppError> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let message = ChatRequest::decode(&body)?;
    info!(message_len = message.len(), "Relaying chat message");

    let reply = generate_reply(state.provider.as_ref(), &message).await?;

    Ok(Json(ChatReply { reply }))
}
