//! Backend entry-point: loads settings, wires storage and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use project_registry::inbound::http::health::HealthState;
use project_registry::inbound::http::session_config::fingerprint::key_fingerprint;
use project_registry::inbound::http::session_config::{BuildMode, session_settings_from_env};
use project_registry::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use project_registry::settings::AppSettings;
use server::{ServerConfig, build_http_state, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let mut config = ServerConfig::new(session, bind_addr).with_seed_fixtures(settings.seed_fixtures());
    if let Some(database_url) = settings.database_url.as_deref() {
        let redacted = settings
            .redacted_database_url()
            .map_err(std::io::Error::other)?;
        info!(database = ?redacted, "connecting to PostgreSQL");
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations applied");
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|err| std::io::Error::other(err.into_message()))?;
        config = config.with_db_pool(pool);
    } else {
        info!("no database configured; projects are kept in memory");
    }

    let http_state = build_http_state(&config).await?;
    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting HTTP server");
    create_server(health_state, http_state, config)?.await
}
