use std::env;
use std::time::Duration;

use dotenvy::dotenv;

use crate::error::{AppError, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://aegis.db?mode=rwc";

/// Number of recent runs fed to the trend classifier.
pub const DEFAULT_HISTORY_DEPTH: i64 = 4;

/// Pause between sites when running the whole batch.
pub const DEFAULT_BATCH_DELAY_MS: u64 = 2000;

/// Simulated crawl time before scoring a site.
pub const DEFAULT_CRAWL_DELAY_MS: u64 = 1500;

/// Agent configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub database_url: String,
    pub history_depth: i64,
    pub batch_delay: Duration,
    pub crawl_delay: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            history_depth: DEFAULT_HISTORY_DEPTH,
            batch_delay: Duration::from_millis(DEFAULT_BATCH_DELAY_MS),
            crawl_delay: Duration::from_millis(DEFAULT_CRAWL_DELAY_MS),
        }
    }
}

impl AgentConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Configuration with no artificial delays, for tests and scripted runs.
    pub fn without_delays() -> Self {
        Self {
            batch_delay: Duration::ZERO,
            crawl_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let history_depth = match lookup("AEGIS_HISTORY_DEPTH") {
            Some(raw) => parse_number::<i64>("AEGIS_HISTORY_DEPTH", &raw)?,
            None => defaults.history_depth,
        };
        // the in-flight run takes one slot
        if history_depth < 2 {
            return Err(AppError::config("AEGIS_HISTORY_DEPTH must be at least 2"));
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            history_depth,
            batch_delay: lookup("AEGIS_BATCH_DELAY_MS")
                .map(|raw| parse_number::<u64>("AEGIS_BATCH_DELAY_MS", &raw))
                .transpose()?
                .map(Duration::from_millis)
                .unwrap_or(defaults.batch_delay),
            crawl_delay: lookup("AEGIS_CRAWL_DELAY_MS")
                .map(|raw| parse_number::<u64>("AEGIS_CRAWL_DELAY_MS", &raw))
                .transpose()?
                .map(Duration::from_millis)
                .unwrap_or(defaults.crawl_delay),
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::config(format!("{key} must be a valid number, got {raw:?}")))
}
