use std::env;
use std::str::FromStr;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// When unset the service keeps records in memory only
    pub database_url: Option<String>,
    pub db_max_connections: u32,

    pub api_prefix: String,
    /// Origins allowed by CORS; `*` allows any origin
    pub cors_allowed_origins: Vec<String>,

    // Logging
    pub log_dir: String,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "0.0.0.0:5000".to_string(),
            database_url: None,
            db_max_connections: 5,
            api_prefix: "/api".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            log_dir: "logs".to_string(),
            log_level: Level::DEBUG,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or(defaults.server_addr),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            api_prefix: lookup("API_PREFIX").unwrap_or(defaults.api_prefix),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or(defaults.cors_allowed_origins),
            log_dir: lookup("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: parse_or(&lookup, "LOG_LEVEL", defaults.log_level)?,
        })
    }
}

/// Comma-separated origin list, blanks dropped.
fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server_addr, "0.0.0.0:5000");
        assert_eq!(config.api_prefix, "/api");
        assert!(config.database_url.is_none());
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.cors_allowed_origins, ["*"]);
    }

    #[test]
    fn splits_cors_origins() {
        let config = Config::from_lookup(lookup(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:3000, https://hr.example.com,,",
        )]))
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            ["http://localhost:3000", "https://hr.example.com"]
        );
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "mysql://root@localhost/attendance"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("LOG_LEVEL", "warn"),
        ]))
        .unwrap();
        assert_eq!(config.database_url.as_deref(), Some("mysql://root@localhost/attendance"));
        assert_eq!(config.db_max_connections, 12);
        assert_eq!(config.log_level, Level::WARN);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = Config::from_lookup(lookup(&[("DB_MAX_CONNECTIONS", "lots")])).unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }
}
