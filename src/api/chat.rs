//! Assistant Chat Requests

use bom_core::api::{ChatReply, ChatRequest, Endpoint, TokenResponse};
use bom_core::AppResult;

use super::{post_json, Body};

pub async fn chat_token(base: &str) -> AppResult<String> {
    let response: TokenResponse = post_json(base, &Endpoint::ChatToken, None, None).await?;
    Ok(response.token)
}

pub async fn send_chat(base: &str, token: &str, message: String) -> AppResult<String> {
    let body = serde_json::to_string(&ChatRequest { message })?;
    let reply: ChatReply = post_json(base, &Endpoint::Chat, Some(Body::Json(body)), Some(token)).await?;
    Ok(reply.message)
}
