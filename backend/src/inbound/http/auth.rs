//! Account handlers: sign-up, login and logout.
//!
//! ```text
//! POST /api/v1/signup {"name":"Priya","email":"priya@example.com","phone":"+919876543210","password":"secret1"}
//! POST /api/v1/login {"email":"priya@example.com","password":"secret1"}
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, SignupDetails, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_auth_validation_error;

/// Sign-up request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[schema(example = "Priya")]
    pub name: String,
    #[schema(example = "priya@example.com")]
    pub email: String,
    #[schema(example = "+919876543210")]
    pub phone: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "priya@example.com")]
    pub email: String,
    pub password: String,
}

/// Identifier of the user bound to the new session.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
}

impl From<&UserId> for SessionUserResponse {
    fn from(value: &UserId) -> Self {
        Self {
            user_id: value.to_string(),
        }
    }
}

/// Register an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SessionUserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["account"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let SignupRequest {
        name,
        email,
        phone,
        password,
    } = payload.into_inner();
    let details = SignupDetails::try_from_parts(&name, &email, &phone, &password)
        .map_err(map_auth_validation_error)?;
    let user_id = state.account.sign_up(&details).await?;
    session.persist_user(&user_id)?;
    info!(user_id = %user_id, "account created");
    Ok(HttpResponse::Created().json(SessionUserResponse::from(&user_id)))
}

/// Password sign-in.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionUserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["account"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_auth_validation_error)?;
    let user_id = state.account.log_in(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().json(SessionUserResponse::from(&user_id)))
}

/// Drop the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session purged")),
    tags = ["account"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}
