//! Backend entry-point: loads settings, builds the connection pool and
//! serves the REST API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use chatte_backend::inbound::http::health::HealthState;
use chatte_backend::outbound::persistence::DbPool;
use server::{AppSettings, ServerConfig, create_server};

fn fatal(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!(error = %err, "{context}");
    std::io::Error::other(format!("{context}: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|err| fatal("failed to load settings", err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| fatal("invalid settings", err))?;
    let pool_config = settings
        .pool_config()
        .map_err(|err| fatal("invalid settings", err))?;

    let db_pool = DbPool::new(pool_config)
        .await
        .map_err(|err| fatal("database unavailable", err))?;
    info!("connected to database");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr, db_pool))?;
    info!(%bind_addr, "listening");

    server.await
}
