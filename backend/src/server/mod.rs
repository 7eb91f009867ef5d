//! Server construction and middleware wiring.

mod adapters;
mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use adapters::build_adapters;
pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use safety_backend::Trace;
#[cfg(debug_assertions)]
use safety_backend::doc::ApiDoc;
use safety_backend::inbound::http::configure_api;
use safety_backend::inbound::http::health::{HealthState, live, ready};
use safety_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Session cookie lifetime.
const SESSION_TTL_HOURS: i64 = 12;

/// Grace period for in-flight requests once draining starts.
const SHUTDOWN_GRACE_SECS: u64 = 30;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
        )
        .build()
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(session_middleware(key, cookie_secure, same_site))
        .configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Drain on Ctrl-C: fail liveness first, then stop accepting work.
fn drain_on_interrupt(handle: ServerHandle, health_state: web::Data<HealthState>) {
    actix_web::rt::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "cannot listen for shutdown signal");
            return;
        }
        info!("shutdown requested; draining");
        health_state.mark_unhealthy();
        handle.stop(true).await;
    });
}

/// Construct the HTTP server and mark it ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when metric registration or binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();

    #[cfg(feature = "metrics")]
    let prometheus = metrics::make_metrics()?;
    #[cfg(feature = "metrics")]
    let dispatch_metrics = Some(metrics::dispatch_metrics(&prometheus)?);
    #[cfg(not(feature = "metrics"))]
    let dispatch_metrics = None;

    let http_state = build_http_state(&config, dispatch_metrics);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .disable_signals()
    .shutdown_timeout(SHUTDOWN_GRACE_SECS)
    .bind(bind_addr)?
    .run();

    drain_on_interrupt(server.handle(), health_state.clone());
    health_state.mark_ready();
    Ok(server)
}
