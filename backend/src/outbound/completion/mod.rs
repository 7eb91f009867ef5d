//! Conversational-completion outbound adapter.

mod dto;
mod http_completion;

pub use http_completion::HttpChatCompletion;
