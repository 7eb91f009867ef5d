//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use safety_backend::outbound::persistence::DbPool;
use std::net::SocketAddr;

use super::adapters::OutboundAdapters;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) adapters: OutboundAdapters,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        adapters: OutboundAdapters,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            adapters,
            db_pool: None,
        }
    }

    /// Attach a database pool; without one the server runs on fixture
    /// repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
