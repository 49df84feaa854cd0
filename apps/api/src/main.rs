//! Mentor API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod extract;
mod handlers;
mod state;

use mentor_core::AppError;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, init_tracing};
use crate::api_services::{EntityStoreChoice, build_app_state, connect_and_migrate};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let store = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = connect_and_migrate(database_url).await?;
            if config.migrate_only {
                info!("database migrations applied successfully");
                return Ok(());
            }
            EntityStoreChoice::Postgres(pool)
        }
        None => {
            if config.migrate_only {
                warn!("DATABASE_URL is not set, nothing to migrate");
                return Ok(());
            }
            warn!("DATABASE_URL is not set, using the in-memory entity store");
            EntityStoreChoice::InMemory
        }
    };

    let app = api_router::build_router(
        build_app_state(store, config.listing),
        &config.frontend_url,
    )?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "mentor-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::internal(format!("api server error: {error}")))
}
