//! Profile handler.
//!
//! ```text
//! GET /api/v1/profile
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::UserProfile;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Profile of the signed-in user.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Priya")]
    pub name: String,
    #[schema(example = "+919876543210")]
    pub phone: String,
}

impl From<UserProfile> for ProfileResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_string(),
            phone: value.phone().to_string(),
        }
    }
}

/// Fetch the signed-in user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Profile not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["account"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let profile = state.profile.fetch_profile(&user_id).await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::Value;

    use crate::domain::Error;
    use crate::domain::ports::MockUserProfileQuery;
    use crate::inbound::http::test_utils::{
        FIXTURE_USER_ID, fixture_ports, fixture_state, session_cookie, test_app,
    };

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(get_profile);
    }

    #[actix_web::test]
    async fn returns_profile_for_session_user() {
        let app = actix_test::init_service(test_app(fixture_state(), routes)).await;
        let cookie = session_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/profile")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["id"], FIXTURE_USER_ID);
        assert_eq!(body["name"], "Ada Lovelace");
    }

    #[actix_web::test]
    async fn requires_session() {
        let app = actix_test::init_service(test_app(fixture_state(), routes)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/profile").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn missing_profile_is_not_found() {
        let mut profile = MockUserProfileQuery::new();
        profile
            .expect_fetch_profile()
            .return_once(|_| Err(Error::not_found("User profile not found")));
        let mut ports = fixture_ports();
        ports.profile = Arc::new(profile);
        let app = actix_test::init_service(test_app(HttpState::new(ports), routes)).await;
        let cookie = session_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/profile")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "User profile not found");
    }
}
