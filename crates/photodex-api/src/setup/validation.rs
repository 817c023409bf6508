//! Configuration validation
//!
//! Checked once at startup so misconfiguration fails before the server binds.

use anyhow::Result;
use photodex_core::Config;

pub fn validate_config(config: &Config) -> Result<()> {
    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Set specific allowed origins via CORS_ORIGINS."
        ));
    }

    if config.db_max_connections() == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.extractor_timeout_secs() == 0 {
        return Err(anyhow::anyhow!("Extractor timeout cannot be 0"));
    }

    if config.http_concurrency_limit() == 0 {
        return Err(anyhow::anyhow!("HTTP concurrency limit cannot be 0"));
    }

    if config.max_request_body_bytes() == 0 {
        return Err(anyhow::anyhow!("Max request body size cannot be 0"));
    }

    if config.database_url().trim().is_empty() {
        return Err(anyhow::anyhow!("DATABASE_URL cannot be empty"));
    }

    if config.exiftool_path().trim().is_empty() {
        return Err(anyhow::anyhow!("EXIFTOOL_PATH cannot be empty"));
    }

    Ok(())
}
