//! User service entry-point: loads settings, prepares the database and serves
//! the REST resource.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use user_service::inbound::http::health::HealthState;
use user_service::outbound::persistence::{DbPool, run_pending_migrations};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let pool_config = settings.pool_config().map_err(std::io::Error::other)?;

    if settings.run_migrations() {
        let applied = run_pending_migrations(pool_config.database_url())
            .await
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations complete");
    }

    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;
    let config = ServerConfig::new(bind_addr, pool);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::build_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
