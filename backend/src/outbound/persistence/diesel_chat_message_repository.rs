//! PostgreSQL-backed `ChatMessageRepository`.
//!
//! History is read newest first with a limit, then reversed so callers get
//! the latest window in conversation order.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ChatMessageRepository, ChatMessageRepositoryError};
use crate::domain::{ChatContent, ChatMessage, ChatRole, NewChatMessage, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ChatMessageRow, NewChatMessageRow};
use super::pool::{DbPool, PoolError};
use super::schema::chat_messages;

/// Diesel-backed chat history.
#[derive(Clone)]
pub struct DieselChatMessageRepository {
    pool: DbPool,
}

impl DieselChatMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ChatMessageRepositoryError {
    map_basic_pool_error(error, ChatMessageRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ChatMessageRepositoryError {
    map_basic_diesel_error(
        error,
        ChatMessageRepositoryError::query,
        ChatMessageRepositoryError::connection,
    )
}

fn row_to_message(row: ChatMessageRow) -> Result<ChatMessage, ChatMessageRepositoryError> {
    let role: ChatRole = row.role.parse().map_err(|err| {
        ChatMessageRepositoryError::query(format!("stored chat message {}: {err}", row.id))
    })?;
    let content = ChatContent::try_from(row.content).map_err(|err| {
        ChatMessageRepositoryError::query(format!("stored chat message {}: {err}", row.id))
    })?;
    Ok(ChatMessage {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        role,
        content,
        created_at: row.created_at,
    })
}

fn oldest_first(
    mut newest_first: Vec<ChatMessageRow>,
) -> Result<Vec<ChatMessage>, ChatMessageRepositoryError> {
    newest_first.reverse();
    newest_first.into_iter().map(row_to_message).collect()
}

#[async_trait]
impl ChatMessageRepository for DieselChatMessageRepository {
    async fn append(
        &self,
        message: &NewChatMessage,
    ) -> Result<ChatMessage, ChatMessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewChatMessageRow {
            id: Uuid::new_v4(),
            user_id: *message.user_id.as_uuid(),
            role: message.role.as_str(),
            content: message.content.as_ref(),
        };

        let stored: ChatMessageRow = diesel::insert_into(chat_messages::table)
            .values(&row)
            .returning(ChatMessageRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_message(stored)
    }

    async fn list_recent(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, ChatMessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ChatMessageRow> = chat_messages::table
            .filter(chat_messages::user_id.eq(user_id.as_uuid()))
            .order((chat_messages::created_at.desc(), chat_messages::id.desc()))
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .select(ChatMessageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        oldest_first(rows)
    }
}
