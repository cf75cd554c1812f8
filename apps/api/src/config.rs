use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::matching::scorer::{MatchConfig, MatchConfigError, MatchWeights};

/// Which `ItemStore` implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("ITEM_STORE must be 'postgres' or 'memory', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub matching: MatchConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let store_backend: StoreBackend = optional_env("ITEM_STORE")
            .unwrap_or_else(|| "postgres".to_string())
            .parse()?;

        let database_url = match store_backend {
            StoreBackend::Postgres => Some(require_env("DATABASE_URL")?),
            StoreBackend::Memory => optional_env("DATABASE_URL"),
        };

        let defaults = MatchConfig::default();
        let matching = MatchConfig {
            weights: MatchWeights {
                name: parse_env("MATCH_WEIGHT_NAME", defaults.weights.name)?,
                category: parse_env("MATCH_WEIGHT_CATEGORY", defaults.weights.category)?,
                location: parse_env("MATCH_WEIGHT_LOCATION", defaults.weights.location)?,
            },
            threshold: parse_env("MATCH_THRESHOLD", defaults.threshold)?,
            min_name_token_len: parse_env("MATCH_MIN_NAME_TOKEN_LEN", defaults.min_name_token_len)?,
        };
        check_matching(&matching)?;

        Ok(Config {
            store_backend,
            database_url,
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            matching,
        })
    }
}

/// Validates the match tunables, naming the env var(s) to fix on failure.
fn check_matching(matching: &MatchConfig) -> Result<()> {
    matching.validate().map_err(|e| {
        let keys = match &e {
            MatchConfigError::InvalidWeight(label) => {
                format!("MATCH_WEIGHT_{}", label.to_ascii_uppercase())
            }
            MatchConfigError::AllWeightsZero => {
                "MATCH_WEIGHT_NAME/MATCH_WEIGHT_CATEGORY/MATCH_WEIGHT_LOCATION".to_string()
            }
            MatchConfigError::ThresholdOutOfRange(_) => "MATCH_THRESHOLD".to_string(),
        };
        anyhow::Error::new(e).context(format!("Invalid matching configuration in {keys}"))
    })
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
