//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use project_registry::inbound::http::session_config::SessionSettings;
use project_registry::outbound::persistence::DbPool;

/// Everything `create_server` and the state builders need.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_fixtures: bool,
}

impl ServerConfig {
    /// Configuration for an in-memory deployment without fixture seeding.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            seed_fixtures: false,
        }
    }

    /// Back the repositories with PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Insert the fixture accounts and projects when the state is built.
    #[must_use]
    pub fn with_seed_fixtures(mut self, seed: bool) -> Self {
        self.seed_fixtures = seed;
        self
    }
}
