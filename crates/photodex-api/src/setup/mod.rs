//! Application setup and initialization
//!
//! Everything `main` needs to go from a [`Config`] to a running router. The
//! pieces are public so integration tests can assemble the same router around
//! their own state.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use photodex_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    photodex_infra::init_telemetry(config.json_logs(), config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment(),
        extractor = %config.metadata_extractor(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;

    let state = services::initialize_services(&config, pool).await?;

    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
