//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/api/v1`, the health probes, the
//! request and response DTOs, and the error envelope wrappers from
//! [`crate::inbound::http::schemas`]. Swagger UI serves it in debug builds.

use crate::inbound::http::alerts::AlertResponse;
use crate::inbound::http::auth::{LoginRequest, SessionUserResponse, SignupRequest};
use crate::inbound::http::chat::{ChatMessageResponse, ChatRequest};
use crate::inbound::http::contacts::{ContactRequest, ContactResponse};
use crate::inbound::http::profile::ProfileResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::sos::{FailedContactResponse, SosResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/signup or /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Personal safety backend API",
        description = "SOS dispatch, emergency contacts, alert history and safety chat."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::add_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::alerts::list_alerts,
        crate::inbound::http::sos::trigger_sos,
        crate::inbound::http::chat::list_messages,
        crate::inbound::http::chat::send_message,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        SignupRequest,
        LoginRequest,
        SessionUserResponse,
        ProfileResponse,
        ContactRequest,
        ContactResponse,
        AlertResponse,
        SosResponse,
        FailedContactResponse,
        ChatRequest,
        ChatMessageResponse,
    )),
    tags(
        (name = "account", description = "Sign-up, login and profile"),
        (name = "contacts", description = "Emergency contacts"),
        (name = "alerts", description = "Alert history"),
        (name = "sos", description = "Emergency dispatch"),
        (name = "chat", description = "Safety assistant"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
