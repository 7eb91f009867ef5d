//! Support chat domain services.
//!
//! A turn appends the user's message, asks the completion service for a
//! reply, then appends the reply. History is append-only; no context window
//! is managed here.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    ChatCommand, ChatCompletion, ChatCompletionError, ChatMessageRepository,
    ChatMessageRepositoryError, ChatQuery, CompletionRequest,
};
use crate::domain::{
    CHAT_HISTORY_LIMIT, ChatContent, ChatMessage, ChatRole, Error, NewChatMessage, UserId,
};

fn map_repository_error(error: ChatMessageRepositoryError) -> Error {
    match error {
        ChatMessageRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("chat repository unavailable: {message}"))
        }
        ChatMessageRepositoryError::Query { message } => {
            Error::internal(format!("chat repository error: {message}"))
        }
    }
}

fn map_completion_error(error: ChatCompletionError) -> Error {
    match error {
        ChatCompletionError::Transport { .. }
        | ChatCompletionError::Timeout { .. }
        | ChatCompletionError::Upstream { .. } => {
            Error::service_unavailable("chat assistant is unavailable, please try again")
        }
        ChatCompletionError::Decode { message } => {
            Error::internal(format!("chat assistant reply invalid: {message}"))
        }
    }
}

/// Chat service implementing both chat driving ports.
#[derive(Clone)]
pub struct ChatService<R, C: ?Sized> {
    message_repo: Arc<R>,
    completion: Arc<C>,
}

impl<R, C: ?Sized> ChatService<R, C> {
    pub fn new(message_repo: Arc<R>, completion: Arc<C>) -> Self {
        Self {
            message_repo,
            completion,
        }
    }
}

#[async_trait]
impl<R, C> ChatCommand for ChatService<R, C>
where
    R: ChatMessageRepository,
    C: ChatCompletion + ?Sized,
{
    async fn respond(&self, user_id: &UserId, message: ChatContent) -> Result<ChatMessage, Error> {
        self.message_repo
            .append(&NewChatMessage {
                user_id: user_id.clone(),
                role: ChatRole::User,
                content: message.clone(),
            })
            .await
            .map_err(map_repository_error)?;

        let reply = self
            .completion
            .complete(&CompletionRequest {
                user_id: user_id.clone(),
                message,
            })
            .await
            .map_err(|err| {
                warn!(user_id = %user_id, error = %err, "chat completion failed");
                map_completion_error(err)
            })?;

        let stored = self
            .message_repo
            .append(&NewChatMessage {
                user_id: user_id.clone(),
                role: ChatRole::Assistant,
                content: reply,
            })
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user_id, message_id = %stored.id, "chat turn completed");
        Ok(stored)
    }
}

#[async_trait]
impl<R, C> ChatQuery for ChatService<R, C>
where
    R: ChatMessageRepository,
    C: ChatCompletion + ?Sized,
{
    async fn history(&self, user_id: &UserId) -> Result<Vec<ChatMessage>, Error> {
        self.message_repo
            .list_recent(user_id, CHAT_HISTORY_LIMIT)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "chat_service_tests.rs"]
mod tests;
