//! Reqwest-backed completion adapter.
//!
//! Posts `{message, userId}` to a single endpoint and expects
//! `{response}` back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use zeroize::Zeroizing;

use super::dto::{CompletionRequestDto, CompletionResponseDto};
use crate::domain::ChatContent;
use crate::domain::ports::{ChatCompletion, ChatCompletionError, CompletionRequest};
use crate::outbound::http_support::body_preview;

/// Completion adapter calling one HTTP endpoint.
pub struct HttpChatCompletion {
    client: Client,
    endpoint: Url,
    token: Option<Zeroizing<String>>,
}

impl HttpChatCompletion {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        token: Option<Zeroizing<String>>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            token,
        })
    }
}

#[async_trait]
impl ChatCompletion for HttpChatCompletion {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<ChatContent, ChatCompletionError> {
        let payload = CompletionRequestDto {
            message: request.message.as_ref(),
            user_id: request.user_id.as_ref(),
        };
        let mut builder = self.client.post(self.endpoint.clone()).json(&payload);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.as_str());
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(ChatCompletionError::upstream(
                status.as_u16(),
                body_preview(body.as_ref()),
            ));
        }

        parse_reply(body.as_ref())
    }
}

fn parse_reply(body: &[u8]) -> Result<ChatContent, ChatCompletionError> {
    let decoded: CompletionResponseDto = serde_json::from_slice(body).map_err(|error| {
        ChatCompletionError::decode(format!("invalid completion payload: {error}"))
    })?;
    match decoded {
        CompletionResponseDto {
            response: Some(text),
            ..
        } => ChatContent::from_reply(text).map_err(|err| ChatCompletionError::decode(err.to_string())),
        CompletionResponseDto {
            error: Some(error), ..
        } => Err(ChatCompletionError::upstream(200_u16, error)),
        _ => Err(ChatCompletionError::decode("completion payload has no response")),
    }
}

fn map_transport_error(error: reqwest::Error) -> ChatCompletionError {
    if error.is_timeout() {
        ChatCompletionError::timeout(error.to_string())
    } else {
        ChatCompletionError::transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network completion helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn request_uses_camel_case_user_id() {
        let payload = CompletionRequestDto {
            message: "help",
            user_id: "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        };
        let value = serde_json::to_value(&payload).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({
                "message": "help",
                "userId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            })
        );
    }

    #[rstest]
    fn parses_reply_text() {
        let reply = parse_reply(br#"{"response":"  Stay safe.  "}"#).expect("reply");
        assert_eq!(reply.as_ref(), "Stay safe.");
    }

    #[rstest]
    #[case(br#"{"response":"   "}"#.as_slice())]
    #[case(br#"{}"#.as_slice())]
    #[case(b"<html>".as_slice())]
    fn unusable_replies_are_decode_errors(#[case] body: &[u8]) {
        let error = parse_reply(body).expect_err("decode fails");
        assert!(matches!(error, ChatCompletionError::Decode { .. }));
    }

    #[rstest]
    fn error_payloads_are_upstream_errors() {
        let error = parse_reply(br#"{"error":"model overloaded"}"#).expect_err("upstream");
        assert!(matches!(error, ChatCompletionError::Upstream { .. }));
    }
}
