//! Application configuration module
//!
//! Provides configuration types for the server. Values come from the
//! environment (`AppConfig::from_env`) or from the builder in tests.

use thiserror::Error;

/// Fallback signing secret for local development
const DEV_JWT_SECRET: &str = "entity-manager-dev-secret-change-me";

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;

/// Default token lifetime (1 hour)
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60;

/// bcrypt's `DEFAULT_COST`
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub port: u16,
    /// PostgreSQL URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from environment variables
    ///
    /// Reads `SERVER_PORT`, `DATABASE_URL`, `JWT_SECRET`, `TOKEN_TTL_SECS`
    /// and `BCRYPT_COST`. Unset variables fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();

        if let Some(port) = env_parsed::<u16>("SERVER_PORT")? {
            builder = builder.port(port);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                builder = builder.database_url(url);
            }
        }
        match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => builder = builder.jwt_secret(secret),
            _ => tracing::warn!("JWT_SECRET not set. Using the development secret."),
        }
        if let Some(ttl) = env_parsed::<u64>("TOKEN_TTL_SECS")? {
            builder = builder.token_ttl_secs(ttl);
        }
        if let Some(cost) = env_parsed::<u32>("BCRYPT_COST")? {
            builder = builder.bcrypt_cost(cost);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_SECS",
                value: "0".to_string(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        Ok(())
    }
}

fn env_parsed<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        Err(_) => Ok(None),
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_ttl_secs: Option<u64>,
    bcrypt_cost: Option<u32>,
}

impl AppConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl_secs(mut self, secs: u64) -> Self {
        self.token_ttl_secs = Some(secs);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            port: self.port.unwrap_or(defaults.port),
            database_url: self.database_url,
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            token_ttl_secs: self.token_ttl_secs.unwrap_or(defaults.token_ttl_secs),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
