use std::time::Duration;
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 15;
const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set in the environment")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BookstoreConfig {
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub query_timeout: Duration,
    pub log_format: LogFormat,
}

impl BookstoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // all env reads go through `lookup` so tests don't have to mutate the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_port = lookup("PORT")
            .filter(|val| !val.is_empty())
            .ok_or(ConfigError::Missing("PORT"))?;
        let port = raw_port.parse::<u16>().map_err(|_| ConfigError::Invalid {
            name: "PORT",
            value: raw_port.clone(),
        })?;

        // DB_URL is the older name, still honoured when DATABASE_URL is absent
        let database_url = lookup("DATABASE_URL")
            .filter(|val| !val.is_empty())
            .or_else(|| lookup("DB_URL").filter(|val| !val.is_empty()))
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = lookup("MAX_CONNECTIONS")
            .and_then(|val| val.parse::<u32>().ok())
            .filter(|val| *val > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let query_timeout = Duration::from_millis(
            lookup("QUERY_TIMEOUT_MS")
                .and_then(|val| val.parse::<u64>().ok())
                .filter(|val| *val > 0)
                .unwrap_or(DEFAULT_QUERY_TIMEOUT_MS),
        );

        let log_format = lookup("LOG_FORMAT")
            .and_then(|val| LogFormat::parse(&val))
            .unwrap_or_default();

        Ok(Self {
            port,
            database_url,
            max_connections,
            query_timeout,
            log_format,
        })
    }
}
