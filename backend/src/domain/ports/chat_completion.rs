//! Driven port for the conversational-completion service.

use async_trait::async_trait;

use crate::domain::{ChatContent, UserId};

use super::define_port_error;

/// Request forwarded to the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub user_id: UserId,
    pub message: ChatContent,
}

define_port_error! {
    /// Errors surfaced while requesting a completion.
    pub enum ChatCompletionError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "chat completion transport failed: {message}",
        /// Request exceeded the client timeout.
        Timeout { message: String } =>
            "chat completion timeout: {message}",
        /// Service answered with a non-success status.
        Upstream { status: u16, message: String } =>
            "chat completion service returned {status}: {message}",
        /// Response body could not be decoded or was empty.
        Decode { message: String } =>
            "chat completion response decode failed: {message}",
    }
}

/// Port for producing assistant replies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<ChatContent, ChatCompletionError>;
}

/// Fixture completion returning a canned reply.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureChatCompletion;

#[async_trait]
impl ChatCompletion for FixtureChatCompletion {
    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<ChatContent, ChatCompletionError> {
        ChatContent::from_reply(
            "If you are in danger, press the SOS button to alert your emergency contacts.",
        )
        .map_err(|err| ChatCompletionError::decode(err.to_string()))
    }
}
