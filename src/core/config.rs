//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, Context, Result};
use std::time::Duration;

/// Default sweep cadence; also the "about to fire" window of the sweeper
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Which reminder store backs the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!(
                "Unknown REMINDER_STORE '{other}' (expected 'sqlite' or 'memory')"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_path: String,
    pub store_backend: StoreBackend,
    pub sweep_interval: Duration,
    pub log_level: String,
    pub homepage: Option<String>,
}

impl Config {
    /// Build the configuration from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| anyhow!("DISCORD_TOKEN must be set"))?;

        let database_path =
            lookup("DATABASE_PATH").unwrap_or_else(|| "reminders.db".to_string());

        let store_backend = match lookup("REMINDER_STORE") {
            Some(value) => StoreBackend::parse(&value)?,
            None => StoreBackend::Sqlite,
        };

        let sweep_secs = match lookup("SWEEP_INTERVAL_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SWEEP_INTERVAL_SECS is not a number: '{value}'"))?,
            None => DEFAULT_SWEEP_INTERVAL_SECS,
        };
        if sweep_secs == 0 {
            return Err(anyhow!("SWEEP_INTERVAL_SECS must be greater than zero"));
        }

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let homepage = lookup("BOT_HOMEPAGE").filter(|url| !url.trim().is_empty());

        Ok(Config {
            discord_token,
            database_path,
            store_backend,
            sweep_interval: Duration::from_secs(sweep_secs),
            log_level,
            homepage,
        })
    }
}
