//! Backend entry-point: loads settings, prepares the database and serves the
//! brokerage REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use tender_backend::inbound::http::health::HealthState;
use tender_backend::outbound::persistence::{DbPool, run_pending_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("loading server settings")?;
    let bind_addr = settings.server_address()?;

    if settings.run_migrations {
        run_pending_migrations(settings.postgres_conn()?.to_owned())
            .await
            .wrap_err("applying database migrations")?;
    }

    let pool = DbPool::new(settings.pool_config()?)
        .await
        .wrap_err("building database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, pool))
        .wrap_err_with(|| format!("binding {bind_addr}"))?;
    info!(%bind_addr, "listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("server terminated")
}
