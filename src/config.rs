use std::{env, time::Duration};

#[derive(Debug, Clone, PartialEq)]
pub enum StorageMode {
    /// Everything lives in process memory and is lost on restart.
    Memory,
    /// SQLite through SeaORM; the URL may point at a file or `sqlite::memory:`.
    Sqlite(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub storage: StorageMode,
    /// Empty means any origin is allowed.
    pub cors_origins: Vec<String>,
    pub shutdown_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("APP_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let environment = match lookup("APP_ENV").as_deref() {
            None | Some("development") | Some("dev") => Environment::Development,
            Some("production") | Some("prod") => Environment::Production,
            Some(other) => anyhow::bail!("APP_ENV must be development or production, got `{other}`"),
        };

        let storage = match lookup("DATABASE_URL") {
            None => StorageMode::Memory,
            Some(url) if url.is_empty() || url == "memory" => StorageMode::Memory,
            Some(url) if url.starts_with("sqlite:") => StorageMode::Sqlite(url),
            Some(url) => anyhow::bail!("DATABASE_URL must be `memory` or a sqlite URL, got `{url}`"),
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty() && *origin != "*")
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let shutdown_timeout = lookup("SHUTDOWN_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        Ok(Self {
            host,
            port,
            environment,
            storage,
            cors_origins,
            shutdown_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_in_memory_development() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage, StorageMode::Memory);
        assert_eq!(config.environment, Environment::Development);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn reads_sqlite_url_and_origins() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("APP_ENV", "production"),
            ("DATABASE_URL", "sqlite://data/orders.db?mode=rwc"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(
            config.storage,
            StorageMode::Sqlite("sqlite://data/orders.db?mode=rwc".into())
        );
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn rejects_unsupported_database() {
        assert!(config_from(&[("DATABASE_URL", "postgres://localhost/db")]).is_err());
    }
}
