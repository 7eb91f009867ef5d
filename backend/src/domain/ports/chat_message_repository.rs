//! Port for chat history persistence.

use async_trait::async_trait;

use crate::domain::{ChatMessage, NewChatMessage, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by chat message repository adapters.
    pub enum ChatMessageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "chat message repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "chat message repository query failed: {message}",
    }
}

/// Port for the append-only chat history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    /// Append one turn and return it as stored.
    async fn append(&self, message: &NewChatMessage)
    -> Result<ChatMessage, ChatMessageRepositoryError>;

    /// The latest `limit` turns for `user_id`, returned oldest first.
    async fn list_recent(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, ChatMessageRepositoryError>;
}

/// Fixture implementation that echoes appends and lists nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureChatMessageRepository;

#[async_trait]
impl ChatMessageRepository for FixtureChatMessageRepository {
    async fn append(
        &self,
        message: &NewChatMessage,
    ) -> Result<ChatMessage, ChatMessageRepositoryError> {
        Ok(ChatMessage {
            id: uuid::Uuid::new_v4(),
            user_id: message.user_id.clone(),
            role: message.role,
            content: message.content.clone(),
            created_at: chrono::Utc::now(),
        })
    }

    async fn list_recent(
        &self,
        _user_id: &UserId,
        _limit: usize,
    ) -> Result<Vec<ChatMessage>, ChatMessageRepositoryError> {
        Ok(Vec::new())
    }
}
