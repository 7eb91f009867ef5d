//! Backend entry point: loads settings, prepares the store and starts the
//! HTTP server.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use safety_backend::inbound::http::health::HealthState;
use safety_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use safety_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use safety_backend::settings::{AppSettings, DatabaseSettings};

use server::{ServerConfig, build_adapters, create_server};

fn init_tracing() {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }
}

async fn connect_store(settings: &DatabaseSettings) -> Result<Option<DbPool>> {
    let Some(url) = settings.url.as_deref() else {
        warn!("DATABASE_URL unset; serving fixture repositories");
        return Ok(None);
    };
    if settings.run_migrations {
        let applied = run_pending_migrations(url)
            .await
            .wrap_err("database migrations failed")?;
        info!(applied, "database schema up to date");
    }
    let mut config = PoolConfig::new(url);
    if let Some(max_size) = settings.pool_max_size {
        config = config.with_max_size(max_size);
    }
    let pool = DbPool::new(config)
        .await
        .wrap_err("failed to build database pool")?;
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        key_fingerprint = %session.key_fingerprint(),
        cookie_secure = session.cookie_secure,
        "session configured"
    );

    let settings = AppSettings::load()?;
    let adapters = build_adapters(&settings)?;
    let bind_addr = settings.server.bind_addr()?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        adapters,
    );
    if let Some(pool) = connect_store(&settings.database).await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await?;
    Ok(())
}
