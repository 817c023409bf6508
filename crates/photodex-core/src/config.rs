//! Configuration module
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file) once at startup and handed to the composition root.

use std::env;
use std::str::FromStr;

const SERVER_PORT: u16 = 8080;
const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const EXTRACTOR_TIMEOUT_SECS: u64 = 30;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
const DEFAULT_DATABASE_URL: &str = "sqlite://photodex.db?mode=rwc";

/// Which metadata extractor backend the normalizer uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractorBackend {
    /// External `exiftool` process
    ExifTool,
    /// In-process header and EXIF reader
    Native,
}

impl FromStr for ExtractorBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exiftool" => Ok(ExtractorBackend::ExifTool),
            "native" => Ok(ExtractorBackend::Native),
            other => Err(anyhow::anyhow!(
                "Unknown METADATA_EXTRACTOR '{}', expected 'exiftool' or 'native'",
                other
            )),
        }
    }
}

impl std::fmt::Display for ExtractorBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractorBackend::ExifTool => write!(f, "exiftool"),
            ExtractorBackend::Native => write!(f, "native"),
        }
    }
}

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
    pub http_concurrency_limit: usize,
    pub max_request_body_bytes: usize,
    /// `json` for structured logs, anything else for the human-readable format
    pub log_format: String,
}

/// Catalogue settings: storage location and metadata extraction
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub base: BaseConfig,
    pub database_url: String,
    pub metadata_extractor: ExtractorBackend,
    pub exiftool_path: String,
    pub extractor_timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<CatalogConfig>);

impl Config {
    fn as_catalog(&self) -> &CatalogConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.as_catalog().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = CatalogConfig::from_lookup(lookup)?;
        Ok(Config(Box::new(config)))
    }

    pub fn server_port(&self) -> u16 {
        self.as_catalog().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_catalog().base.cors_origins
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_catalog().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_catalog().base.db_timeout_seconds
    }

    pub fn environment(&self) -> &str {
        &self.as_catalog().base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_catalog().base.http_concurrency_limit
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.as_catalog().base.max_request_body_bytes
    }

    pub fn json_logs(&self) -> bool {
        self.as_catalog().base.log_format.eq_ignore_ascii_case("json")
    }

    pub fn database_url(&self) -> &str {
        &self.as_catalog().database_url
    }

    pub fn metadata_extractor(&self) -> ExtractorBackend {
        self.as_catalog().metadata_extractor
    }

    pub fn exiftool_path(&self) -> &str {
        &self.as_catalog().exiftool_path
    }

    pub fn extractor_timeout_secs(&self) -> u64 {
        self.as_catalog().extractor_timeout_secs
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl CatalogConfig {
    fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let metadata_extractor = match lookup("METADATA_EXTRACTOR") {
            Some(value) => value.parse::<ExtractorBackend>()?,
            None => ExtractorBackend::ExifTool,
        };

        let base = BaseConfig {
            server_port: parse_or(&lookup, "SERVER_PORT", SERVER_PORT),
            cors_origins,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: parse_or(&lookup, "DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            environment,
            http_concurrency_limit: parse_or(
                &lookup,
                "HTTP_CONCURRENCY_LIMIT",
                HTTP_CONCURRENCY_LIMIT,
            ),
            max_request_body_bytes: parse_or(
                &lookup,
                "MAX_REQUEST_BODY_BYTES",
                MAX_REQUEST_BODY_BYTES,
            ),
            log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
        };

        Ok(CatalogConfig {
            base,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            metadata_extractor,
            exiftool_path: lookup("EXIFTOOL_PATH").unwrap_or_else(|| "exiftool".to_string()),
            extractor_timeout_secs: parse_or(
                &lookup,
                "EXTRACTOR_TIMEOUT_SECS",
                EXTRACTOR_TIMEOUT_SECS,
            ),
        })
    }
}
