//! Driving port for support chat turns.

use async_trait::async_trait;

use crate::domain::{ChatContent, ChatMessage, ChatRole, Error, UserId};

/// Domain use-case port for one user/assistant exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCommand: Send + Sync {
    /// Persist `message`, obtain a reply and persist it. Returns the stored
    /// assistant turn.
    async fn respond(&self, user_id: &UserId, message: ChatContent) -> Result<ChatMessage, Error>;
}

/// Fixture command that answers with a canned reply and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureChatCommand;

#[async_trait]
impl ChatCommand for FixtureChatCommand {
    async fn respond(&self, user_id: &UserId, _message: ChatContent) -> Result<ChatMessage, Error> {
        let content = ChatContent::from_reply("I'm here to help. Stay safe.")
            .map_err(|err| Error::internal(format!("invalid fixture reply: {err}")))?;
        Ok(ChatMessage {
            id: uuid::Uuid::new_v4(),
            user_id: user_id.clone(),
            role: ChatRole::Assistant,
            content,
            created_at: chrono::Utc::now(),
        })
    }
}
