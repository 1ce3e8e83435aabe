//! # Catalog Configuration
//!
//! Configuration for token issuance, feature flags and logging.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CATALOG_JWT_KEY=...                                                │
//! │     CATALOG_ENABLE_DELETE=true                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     path passed to CatalogConfig::load                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     no signing key, no users, delete disabled                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # catalog.toml
//! [jwt]
//! issuer = "catalog-api"
//! audience = "catalog-clients"
//! key = "a-long-random-signing-key"
//! lifetime_secs = 7200
//!
//! [[users]]
//! username = "admin"
//! password = "admin123"
//! role = "Admin"
//!
//! [features]
//! enable_delete = true
//!
//! [logging]
//! filter = "info,catalog_store=debug"
//! ```
//!
//! ## Placeholders
//! Deployment templates often ship values such as `<set-in-app-service>`.
//! Any value that is blank or contains `<` or `>` counts as not configured.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// True when `value` holds a real setting rather than a blank or a template
/// placeholder.
pub fn is_configured_value(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && !trimmed.contains('<') && !trimmed.contains('>')
}

// =============================================================================
// JWT Settings
// =============================================================================

/// Token signing and validation settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// `iss` claim written into and required on every token.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// `aud` claim written into and required on every token.
    #[serde(default = "default_audience")]
    pub audience: String,

    /// HMAC-SHA256 signing key. No default; must be configured.
    #[serde(default)]
    pub key: Option<String>,

    /// Token lifetime in seconds.
    #[serde(default = "default_lifetime")]
    pub lifetime_secs: i64,
}

fn default_issuer() -> String {
    "catalog-api".to_string()
}

fn default_audience() -> String {
    "catalog-clients".to_string()
}

fn default_lifetime() -> i64 {
    7200 // 2 hours
}

impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            issuer: default_issuer(),
            audience: default_audience(),
            key: None,
            lifetime_secs: default_lifetime(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("lifetime_secs", &self.lifetime_secs)
            .finish()
    }
}

impl JwtConfig {
    /// Returns the signing key if one is really configured.
    pub fn signing_key(&self) -> ConfigResult<&str> {
        self.key
            .as_deref()
            .filter(|key| is_configured_value(key))
            .ok_or_else(|| ConfigError::MissingRequired("jwt.key".to_string()))
    }
}

// =============================================================================
// Users
// =============================================================================

/// A configured account allowed to request tokens.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppUser {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for AppUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl AppUser {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        AppUser {
            username: username.into(),
            password: password.into(),
            role: role.into(),
        }
    }
}

// =============================================================================
// Feature Flags
// =============================================================================

/// Runtime feature switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Allows item deletion. Off by default.
    #[serde(default)]
    pub enable_delete: bool,
}

// =============================================================================
// Logging
// =============================================================================

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete catalog service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub jwt: JwtConfig,

    #[serde(default)]
    pub users: Vec<AppUser>,

    #[serde(default)]
    pub features: FeatureFlags,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CatalogConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (if given and present)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Does not apply overrides or validate.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Checks that the configuration can serve token requests.
    pub fn validate(&self) -> ConfigResult<()> {
        self.jwt.signing_key()?;

        if !is_configured_value(&self.jwt.issuer) {
            return Err(ConfigError::MissingRequired("jwt.issuer".to_string()));
        }
        if !is_configured_value(&self.jwt.audience) {
            return Err(ConfigError::MissingRequired("jwt.audience".to_string()));
        }
        if self.jwt.lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("jwt.lifetime_secs".to_string()));
        }

        for user in &self.users {
            if user.username.trim().is_empty() || user.password.is_empty() {
                return Err(ConfigError::InvalidValue("users".to_string()));
            }
        }
        if self.users.is_empty() {
            warn!("No users configured; every token request will be rejected");
        }

        Ok(())
    }

    /// Applies overrides from the process environment.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`. Unset, blank and placeholder values
    /// leave the current setting alone.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| is_configured_value(value));

        if let Some(key) = var("CATALOG_JWT_KEY") {
            debug!("Overriding JWT signing key from environment");
            self.jwt.key = Some(key);
        }

        if let Some(issuer) = var("CATALOG_JWT_ISSUER") {
            self.jwt.issuer = issuer;
        }

        if let Some(audience) = var("CATALOG_JWT_AUDIENCE") {
            self.jwt.audience = audience;
        }

        if let Some(lifetime) = var("CATALOG_JWT_LIFETIME_SECS") {
            match lifetime.trim().parse::<i64>() {
                Ok(secs) => self.jwt.lifetime_secs = secs,
                Err(_) => warn!(value = %lifetime, "Ignoring invalid token lifetime in environment"),
            }
        }

        if let Some(flag) = var("CATALOG_ENABLE_DELETE") {
            match flag.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => self.features.enable_delete = true,
                "false" | "0" | "no" | "off" => self.features.enable_delete = false,
                _ => warn!(value = %flag, "Unknown delete flag value in environment"),
            }
        }

        if let Some(filter) = var("CATALOG_LOG_FILTER") {
            self.logging.filter = filter;
        }
    }
}
