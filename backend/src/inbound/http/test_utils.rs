//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};

use crate::domain::ports::{
    FixtureAccountCommand, FixtureAlertsQuery, FixtureChatCommand, FixtureChatQuery,
    FixtureContactsCommand, FixtureContactsQuery, FixtureSosDispatch, FixtureUserProfileQuery,
};
use crate::domain::UserId;

use super::session::SessionContext;
use super::state::{HttpState, HttpStatePorts};

pub(crate) const FIXTURE_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Cookie session middleware with a fresh key and `Secure` disabled.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports backed by fixtures; tests override the one under test.
pub(crate) fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        account: Arc::new(FixtureAccountCommand),
        profile: Arc::new(FixtureUserProfileQuery),
        contacts: Arc::new(FixtureContactsQuery),
        contacts_command: Arc::new(FixtureContactsCommand),
        alerts: Arc::new(FixtureAlertsQuery),
        sos: Arc::new(FixtureSosDispatch),
        chat: Arc::new(FixtureChatCommand),
        chat_query: Arc::new(FixtureChatQuery),
    }
}

pub(crate) fn fixture_state() -> HttpState {
    HttpState::new(fixture_ports())
}

/// Handler that signs the fixture user in, mounted at `/test/session`.
pub(crate) async fn sign_in_fixture_user(
    session: SessionContext,
) -> super::ApiResult<actix_web::HttpResponse> {
    let id = UserId::new(FIXTURE_USER_ID)
        .map_err(|err| crate::domain::Error::internal(err.to_string()))?;
    session.persist_user(&id)?;
    Ok(actix_web::HttpResponse::Ok().finish())
}

/// Call `/test/session` and return the issued cookie.
pub(crate) async fn session_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, test::TestRequest::get().uri("/test/session").to_request())
        .await;
    assert!(res.status().is_success(), "fixture sign-in succeeds");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// App with session middleware, JSON config and `state`, with `configure`
/// mounting handlers under `/api/v1`.
pub(crate) fn test_app(
    state: HttpState,
    configure: fn(&mut web::ServiceConfig),
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(super::validation::json_config())
        .wrap(test_session_middleware())
        .route("/test/session", web::get().to(sign_in_fixture_user))
        .service(web::scope("/api/v1").configure(configure))
}
