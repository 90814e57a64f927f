use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://cinema.db?mode=rwc";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

// Settings read from the environment (and `.env`); server options stay in Rocket.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub run_migrations: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(3),
            run_migrations: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);
        let max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?;
        let acquire_timeout = parse_or(
            &lookup,
            "DATABASE_ACQUIRE_TIMEOUT_SECS",
            defaults.acquire_timeout.as_secs(),
        )?;
        let run_migrations = parse_or(&lookup, "RUN_MIGRATIONS", defaults.run_migrations)?;

        Ok(AppConfig {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout),
            run_migrations,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
