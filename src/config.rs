use std::time::Duration;

use crate::sources::{DEFAULT_DISCOGS_URL, DEFAULT_ITUNES_URL};

/// Runtime settings read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub discogs_api_url: String,
    pub itunes_api_url: String,
    pub http_timeout: Duration,
    /// Seeds the stored username on first start
    pub discogs_username: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "discojanice.db".to_string(),
            port: 3000,
            discogs_api_url: DEFAULT_DISCOGS_URL.to_string(),
            itunes_api_url: DEFAULT_ITUNES_URL.to_string(),
            http_timeout: Duration::from_secs(10),
            discogs_username: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset or unparsable values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            discogs_api_url: lookup("DISCOGS_API_URL").unwrap_or(defaults.discogs_api_url),
            itunes_api_url: lookup("ITUNES_API_URL").unwrap_or(defaults.itunes_api_url),
            http_timeout: lookup("HTTP_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            discogs_username: lookup("DISCOGS_USERNAME").filter(|name| !name.is_empty()),
        }
    }
}
