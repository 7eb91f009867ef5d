//! Support chat turns.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Number of turns returned by the history query.
pub const CHAT_HISTORY_LIMIT: usize = 50;
/// Maximum message length in characters after trimming.
pub const CHAT_CONTENT_MAX: usize = 1000;

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chat role: {0}")]
pub struct UnknownChatRole(pub String);

impl FromStr for ChatRole {
    type Err = UnknownChatRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(UnknownChatRole(other.to_owned())),
        }
    }
}

/// Validation errors for chat content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatContentError {
    #[error("message must not be empty")]
    Empty,
    #[error("message must be at most {max} characters")]
    TooLong { max: usize },
}

/// Trimmed, non-empty chat message text.
///
/// [`ChatContent::new`] is the user-input path and caps the text at
/// [`CHAT_CONTENT_MAX`] characters. Assistant replies, stored rows and
/// deserialised values go through [`ChatContent::from_reply`], which does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChatContent(String);

impl ChatContent {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ChatContentError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ChatContentError::Empty);
        }
        if trimmed.chars().count() > CHAT_CONTENT_MAX {
            return Err(ChatContentError::TooLong {
                max: CHAT_CONTENT_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wrap text produced by the completion service or read from the store.
    ///
    /// Only emptiness is checked; assistant replies have no length cap.
    pub fn from_reply(raw: impl AsRef<str>) -> Result<Self, ChatContentError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ChatContentError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ChatContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ChatContent> for String {
    fn from(value: ChatContent) -> Self {
        value.0
    }
}

impl TryFrom<String> for ChatContent {
    type Error = ChatContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_reply(value)
    }
}

/// Chat turn waiting to be appended to the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    pub user_id: UserId,
    pub role: ChatRole,
    pub content: ChatContent,
}

/// Stored chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: UserId,
    pub role: ChatRole,
    pub content: ChatContent,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", ChatContentError::Empty)]
    #[case(" \n\t ", ChatContentError::Empty)]
    fn blank_content_is_rejected(#[case] raw: &str, #[case] expected: ChatContentError) {
        assert_eq!(ChatContent::new(raw), Err(expected));
    }

    #[rstest]
    fn content_over_limit_is_rejected() {
        let raw = "x".repeat(CHAT_CONTENT_MAX + 1);
        assert_eq!(
            ChatContent::new(raw),
            Err(ChatContentError::TooLong {
                max: CHAT_CONTENT_MAX
            })
        );
    }

    #[rstest]
    fn content_at_limit_after_trim_is_accepted() {
        let raw = format!("  {}  ", "x".repeat(CHAT_CONTENT_MAX));
        let content = ChatContent::new(raw).expect("limit is inclusive");
        assert_eq!(content.as_ref().len(), CHAT_CONTENT_MAX);
    }

    #[rstest]
    fn replies_are_not_length_capped() {
        let raw = "y".repeat(CHAT_CONTENT_MAX * 2);
        assert!(ChatContent::from_reply(raw).is_ok());
    }

    #[rstest]
    fn deserialised_content_skips_the_user_input_cap() {
        let long = "z".repeat(CHAT_CONTENT_MAX + 500);
        let content: ChatContent =
            serde_json::from_value(serde_json::Value::String(format!(" {long} ")))
                .expect("stored assistant text deserialises");
        assert_eq!(content.as_ref(), long.as_str());
        assert!(ChatContent::new(content.as_ref()).is_err());
    }

    #[rstest]
    fn deserialised_content_must_not_be_blank() {
        let result = serde_json::from_value::<ChatContent>(serde_json::Value::String("  ".into()));
        assert!(result.is_err());
    }

    #[rstest]
    #[case("user", ChatRole::User)]
    #[case("assistant", ChatRole::Assistant)]
    fn roles_parse(#[case] raw: &str, #[case] expected: ChatRole) {
        assert_eq!(raw.parse::<ChatRole>(), Ok(expected));
    }
}
