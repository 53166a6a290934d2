use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse {name} as port: {source}")]
    ParsePort {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::InvalidValue {
                name: "STORE_BACKEND".into(),
                value: s.to_string(),
            }),
        }
    }
}

/// Settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub posts_collection: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = or("PORT", "8000")
            .parse::<u16>()
            .map_err(|source| ConfigError::ParsePort {
                name: "PORT".into(),
                source,
            })?;

        Ok(AppConfig {
            host: or("HOST", "localhost"),
            port,
            store_backend: or("STORE_BACKEND", "mongo").parse()?,
            mongodb_uri: or("MONGODB_URI", "mongodb://localhost:27017"),
            mongodb_database: or("MONGODB_DATABASE", "posts_db"),
            posts_collection: or("POSTS_COLLECTION", "posts"),
        })
    }
}
