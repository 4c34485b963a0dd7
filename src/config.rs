//! Runtime configuration read from the environment (and `.env` via dotenvy)

use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_QUOTE_CACHE_CAPACITY: u64 = 1000;
const DEFAULT_QUOTE_CACHE_TTL_SECS: u64 = 30 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub quote_cache_capacity: u64,
    pub quote_cache_ttl: Duration,
}

impl Config {
    /// Load from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = parse_or(&lookup, "BIND_ADDR", || SocketAddr::from(([0, 0, 0, 0], 8080)))?;
        let quote_cache_capacity =
            parse_or(&lookup, "QUOTE_CACHE_CAPACITY", || DEFAULT_QUOTE_CACHE_CAPACITY)?;
        let ttl_secs = parse_or(&lookup, "QUOTE_CACHE_TTL_SECS", || DEFAULT_QUOTE_CACHE_TTL_SECS)?;

        Ok(Self {
            database_url,
            bind_addr,
            quote_cache_capacity,
            quote_cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

fn parse_or<T, F, D>(lookup: &F, name: &'static str, default: D) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&'static str) -> Option<String>,
    D: FnOnce() -> T,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/mbcb")])).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.quote_cache_capacity, 1000);
        assert_eq!(config.quote_cache_ttl, Duration::from_secs(1800));
    }

    #[test]
    fn test_missing_database_url() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_value() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/mbcb"),
            ("QUOTE_CACHE_CAPACITY", "lots"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("QUOTE_CACHE_CAPACITY"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/mbcb"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("QUOTE_CACHE_TTL_SECS", "60"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.quote_cache_ttl, Duration::from_secs(60));
    }
}
