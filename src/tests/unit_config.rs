use crate::config::{BookstoreConfig, ConfigError, LogFormat};
use std::collections::HashMap;
use std::time::Duration;

// build a config from a fixed set of variables instead of the real environment
fn config_from(vars: &[(&str, &str)]) -> Result<BookstoreConfig, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    BookstoreConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_required_values_and_defaults() {
    let config = config_from(&[("PORT", "8080"), ("DATABASE_URL", "sqlite://books.db")]).unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.database_url, "sqlite://books.db");
    assert_eq!(config.max_connections, 15);
    assert_eq!(config.query_timeout, Duration::from_millis(5000));
    assert_eq!(config.log_format, LogFormat::Pretty);
}

#[test]
fn test_missing_port_is_fatal() {
    let err = config_from(&[("DATABASE_URL", "sqlite://books.db")]).unwrap_err();
    assert_eq!(err, ConfigError::Missing("PORT"));

    // an empty value is treated as missing
    let err = config_from(&[("PORT", ""), ("DATABASE_URL", "sqlite://books.db")]).unwrap_err();
    assert_eq!(err, ConfigError::Missing("PORT"));
}

#[test]
fn test_invalid_port_is_fatal() {
    let err = config_from(&[("PORT", "eighty"), ("DATABASE_URL", "sqlite://books.db")])
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::Invalid {
            name: "PORT",
            value: "eighty".to_string()
        }
    );
}

#[test]
fn test_missing_database_url_is_fatal() {
    let err = config_from(&[("PORT", "8080")]).unwrap_err();
    assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
}

#[test]
fn test_db_url_is_accepted_as_fallback() {
    let config = config_from(&[("PORT", "8080"), ("DB_URL", "sqlite://legacy.db")]).unwrap();
    assert_eq!(config.database_url, "sqlite://legacy.db");

    // DATABASE_URL takes precedence when both are set
    let config = config_from(&[
        ("PORT", "8080"),
        ("DB_URL", "sqlite://legacy.db"),
        ("DATABASE_URL", "sqlite://books.db"),
    ])
    .unwrap();
    assert_eq!(config.database_url, "sqlite://books.db");
}

#[test]
fn test_optional_values_are_parsed_or_defaulted() {
    let config = config_from(&[
        ("PORT", "3000"),
        ("DATABASE_URL", "sqlite::memory:"),
        ("MAX_CONNECTIONS", "4"),
        ("QUERY_TIMEOUT_MS", "250"),
        ("LOG_FORMAT", "JSON"),
    ])
    .unwrap();
    assert_eq!(config.max_connections, 4);
    assert_eq!(config.query_timeout, Duration::from_millis(250));
    assert_eq!(config.log_format, LogFormat::Json);

    // garbage falls back to the defaults instead of failing startup
    let config = config_from(&[
        ("PORT", "3000"),
        ("DATABASE_URL", "sqlite::memory:"),
        ("MAX_CONNECTIONS", "0"),
        ("QUERY_TIMEOUT_MS", "soon"),
        ("LOG_FORMAT", "fancy"),
    ])
    .unwrap();
    assert_eq!(config.max_connections, 15);
    assert_eq!(config.query_timeout, Duration::from_millis(5000));
    assert_eq!(config.log_format, LogFormat::Pretty);
}
