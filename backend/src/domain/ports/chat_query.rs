//! Driving port for chat history reads.

use async_trait::async_trait;

use crate::domain::{ChatMessage, Error, UserId};

/// Domain use-case port for loading chat history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatQuery: Send + Sync {
    /// Latest turns for `user_id`, oldest first.
    async fn history(&self, user_id: &UserId) -> Result<Vec<ChatMessage>, Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureChatQuery;

#[async_trait]
impl ChatQuery for FixtureChatQuery {
    async fn history(&self, _user_id: &UserId) -> Result<Vec<ChatMessage>, Error> {
        Ok(Vec::new())
    }
}
