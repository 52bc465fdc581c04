//! Diver service entry-point: loads settings, builds adapters and serves HTTP.

mod server;

use std::io;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use diver_service::ServiceSettings;
use diver_service::outbound::directory::DirectoryHttpClient;
use diver_service::outbound::persistence::{DbPool, PoolConfig};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let pool_config = PoolConfig::new(settings.database_url().map_err(io::Error::other)?)
        .with_max_size(settings.db_max_connections())
        .with_min_idle(Some(settings.db_min_idle()))
        .with_connection_timeout(settings.db_connection_timeout());
    let db_pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;

    let directory_url = settings.directory_url().map_err(io::Error::other)?;
    info!(%directory_url, "using user directory");
    let directory_timeout = settings.directory_timeout().map_err(io::Error::other)?;
    let directory = DirectoryHttpClient::new(directory_url, directory_timeout)
        .map_err(io::Error::other)?;

    let config = ServerConfig::new(bind_addr, db_pool, directory);
    create_server(config)?.await
}
