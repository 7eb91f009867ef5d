//! Safety assistant chat handlers.
//!
//! ```text
//! GET /api/v1/chat/messages
//! POST /api/v1/chat/messages {"message":"Someone is following me"}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ChatContent, ChatMessage};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_chat_content_error;

/// One user turn.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[schema(example = "Someone is following me")]
    pub message: String,
}

/// Stored chat turn.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResponse {
    pub id: String,
    #[schema(example = "assistant")]
    pub role: String,
    pub content: String,
    pub created_at: String,
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(value: ChatMessage) -> Self {
        Self {
            id: value.id.to_string(),
            role: value.role.to_string(),
            content: value.content.into(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Latest chat turns, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/chat/messages",
    responses(
        (status = 200, description = "Chat history", body = [ChatMessageResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["chat"],
    operation_id = "listChatMessages"
)]
#[get("/chat/messages")]
pub async fn list_messages(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ChatMessageResponse>>> {
    let user_id = session.require_user_id()?;
    let history = state.chat_query.history(&user_id).await?;
    Ok(web::Json(
        history.into_iter().map(ChatMessageResponse::from).collect(),
    ))
}

/// Send one message and receive the assistant's reply.
#[utoipa::path(
    post,
    path = "/api/v1/chat/messages",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatMessageResponse),
        (status = 400, description = "Invalid message", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Assistant unavailable", body = ErrorSchema)
    ),
    tags = ["chat"],
    operation_id = "sendChatMessage"
)]
#[post("/chat/messages")]
pub async fn send_message(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ChatRequest>,
) -> ApiResult<web::Json<ChatMessageResponse>> {
    let user_id = session.require_user_id()?;
    let content = ChatContent::new(&payload.message).map_err(map_chat_content_error)?;
    let reply = state.chat.respond(&user_id, content).await?;
    Ok(web::Json(ChatMessageResponse::from(reply)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::ports::MockChatCommand;
    use crate::domain::{CHAT_CONTENT_MAX, Error};
    use crate::inbound::http::test_utils::{
        fixture_ports, fixture_state, session_cookie, test_app,
    };

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(list_messages).service(send_message);
    }

    #[actix_web::test]
    async fn returns_assistant_reply() {
        let app = actix_test::init_service(test_app(fixture_state(), routes)).await;
        let cookie = session_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/chat/messages")
                .cookie(cookie)
                .set_json(json!({"message": "Is this area safe at night?"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["role"], "assistant");
        assert_eq!(body["content"], "I'm here to help. Stay safe.");
    }

    #[rstest]
    #[case(String::from("   "), "empty_message")]
    #[case("x".repeat(CHAT_CONTENT_MAX + 1), "message_too_long")]
    #[actix_web::test]
    async fn rejects_out_of_range_messages(#[case] message: String, #[case] code: &str) {
        let mut chat = MockChatCommand::new();
        chat.expect_respond().never();
        let mut ports = fixture_ports();
        ports.chat = Arc::new(chat);
        let app = actix_test::init_service(test_app(HttpState::new(ports), routes)).await;
        let cookie = session_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/chat/messages")
                .cookie(cookie)
                .set_json(json!({ "message": message }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "message");
        assert_eq!(body["details"]["code"], code);
    }

    #[actix_web::test]
    async fn completion_outage_is_service_unavailable() {
        let mut chat = MockChatCommand::new();
        chat.expect_respond()
            .return_once(|_, _| Err(Error::service_unavailable("assistant unavailable")));
        let mut ports = fixture_ports();
        ports.chat = Arc::new(chat);
        let app = actix_test::init_service(test_app(HttpState::new(ports), routes)).await;
        let cookie = session_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/chat/messages")
                .cookie(cookie)
                .set_json(json!({"message": "help"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn history_starts_empty() {
        let app = actix_test::init_service(test_app(fixture_state(), routes)).await;
        let cookie = session_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/chat/messages")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!([]));
    }
}
