//! Service entry-point: loads settings, selects the bird store and serves HTTP.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use birds_api::inbound::http::health::HealthState;
use birds_api::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use birds_api::settings::BirdsSettings;

use server::{ServerConfig, create_server};

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

    let settings = BirdsSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = build_server_config(&settings).await?;

    info!(addr = %config.bind_addr(), "starting birds service");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}

async fn build_server_config(settings: &BirdsSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let update_mode = settings.update_mode().map_err(std::io::Error::other)?;

    let config = ServerConfig::new(bind_addr)
        .with_update_mode(update_mode)
        .with_example_birds(settings.seed_examples)
        .with_id_seed(settings.id_seed())
        .with_server_url(settings.server_url().map(str::to_owned));

    let Some(database_url) = settings.database_url().map_err(std::io::Error::other)? else {
        return Ok(config);
    };

    run_pending_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(std::io::Error::other)?;
    Ok(config.with_db_pool(pool))
}
