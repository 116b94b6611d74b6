//! Assistant Chat
//!
//! Transcript of the assistant panel. One message may be in flight at a
//! time; the auth token is fetched lazily before the first message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Local status lines (errors, connection notes)
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatTranscript {
    pub token: Option<String>,
    pub messages: Vec<ChatMessage>,
    /// A message is awaiting its reply
    pub pending: bool,
    /// The transcript was cleared after the pending message was sent
    #[serde(default)]
    discard_reply: bool,
}

impl ChatTranscript {
    /// Record a user message; returns the text to send, or None when
    /// the input is blank or a reply is still pending
    pub fn push_user(&mut self, text: &str, now: DateTime<Utc>) -> Option<String> {
        let text = text.trim();
        if text.is_empty() || self.pending {
            return None;
        }
        self.messages.push(ChatMessage {
            role: Role::User,
            text: text.to_string(),
            sent_at: now,
        });
        self.pending = true;
        Some(text.to_string())
    }

    pub fn resolve_reply(&mut self, result: Result<String, AppError>, now: DateTime<Utc>) {
        self.pending = false;
        // a rejected token is not reused, even for a discarded reply
        if matches!(result, Err(AppError::Http { status: 401 | 403, .. })) {
            self.token = None;
        }
        if std::mem::take(&mut self.discard_reply) {
            log::debug!("dropping reply to a cleared message");
            return;
        }
        let (role, text) = match result {
            Ok(reply) => (Role::Assistant, reply),
            Err(e) => {
                log::warn!("assistant request failed: {}", e);
                (Role::System, e.user_message())
            }
        };
        self.messages.push(ChatMessage { role, text, sent_at: now });
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn needs_token(&self) -> bool {
        self.token.is_none()
    }

    /// Drop the history; a reply still in flight is swallowed when it lands
    pub fn clear(&mut self) {
        self.messages.clear();
        self.discard_reply = self.pending;
    }
}
