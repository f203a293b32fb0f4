//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to keep code and
//! deployment settings separate. A `.env` file is honored when present.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 3000;

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,

    /// HS256 secret used to verify session tokens
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,

    /// Upper bound for a single project store call
    pub store_timeout_ms: u64,

    /// Comma-separated list of allowed CORS origins, `*` for any
    pub cors_allowed_origins: String,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("store_timeout_ms", &self.store_timeout_ms)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("rust_log", &self.rust_log)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} is required", key))
        };

        let store_timeout_ms = match lookup("STORE_TIMEOUT_MS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("STORE_TIMEOUT_MS must be an integer, got {raw}"))?,
            None => DEFAULT_STORE_TIMEOUT_MS,
        };

        if store_timeout_ms == 0 {
            return Err(anyhow::anyhow!("STORE_TIMEOUT_MS must be greater than 0"));
        }

        let config = Self {
            database_url: required("DATABASE_URL")?,

            jwt_secret: required("JWT_SECRET")?,
            jwt_issuer: lookup("JWT_ISSUER").filter(|v| !v.is_empty()),
            jwt_audience: lookup("JWT_AUDIENCE").filter(|v| !v.is_empty()),

            store_timeout_ms,

            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string()),

            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "edio=debug".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        };

        Ok(config)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
