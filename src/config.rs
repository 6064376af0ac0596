use std::env;
use std::str::FromStr;

use crate::utils::AppError;

/// Which `UserStore` implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDB,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDB),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(AppError::ConfigError(format!(
                "Unknown STORE_BACKEND '{}' (expected 'mongodb' or 'memory')",
                other
            ))),
        }
    }
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub backend: StoreBackend,
    pub mongodb_uri: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub users_collection: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: get("HOST", "0.0.0.0"),
            port: parse_port("PORT", &get("PORT", "4567"))?,
            backend: get("STORE_BACKEND", "mongodb").parse()?,
            mongodb_uri: lookup("MONGODB_URI").filter(|uri| !uri.is_empty()),
            db_host: get("DB_HOST", "localhost"),
            db_port: parse_port("DB_PORT", &get("DB_PORT", "27017"))?,
            db_name: get("DB_NAME", "egen-be-challenge"),
            users_collection: get("USERS_COLLECTION_NAME", "users"),
            cors_allowed_origins,
        })
    }

    /// Connection string for the driver; `MONGODB_URI` wins over host/port.
    pub fn connection_uri(&self) -> String {
        match &self.mongodb_uri {
            Some(uri) => uri.clone(),
            None => format!("mongodb://{}:{}", self.db_host, self.db_port),
        }
    }

    /// Connection string safe for logs: any `user:password@` part is masked.
    pub fn redacted_uri(&self) -> String {
        let uri = self.connection_uri();
        let Some(scheme_end) = uri.find("://").map(|i| i + 3) else {
            return uri;
        };
        let authority_end = uri[scheme_end..]
            .find(['/', '?'])
            .map_or(uri.len(), |i| scheme_end + i);

        match uri[scheme_end..authority_end].rfind('@') {
            Some(at) => format!("{}***{}", &uri[..scheme_end], &uri[scheme_end + at..]),
            None => uri,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::ConfigError(format!("{} must be a port number, got '{}'", key, value)))
}
