//! # Catalog API
//!
//! Request layer for the item catalog: item endpoints, token issuance and
//! bearer authentication, independent of any particular HTTP framework.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog API Services                            │
//! │                                                                         │
//! │  ┌────────────────────┐  ┌────────────────────┐  ┌──────────────────┐  │
//! │  │  ItemsService      │  │  AuthService       │  │ RequestAuthent-  │  │
//! │  │                    │  │                    │  │ icator           │  │
//! │  │ • list   (anon)    │  │ • create_token     │  │                  │  │
//! │  │ • get    (anon)    │  │   (anon)           │  │ • authenticate   │  │
//! │  │ • create (Admin)   │  │                    │  │   Bearer header  │  │
//! │  │ • update (Admin)   │  │                    │  │   → Claims       │  │
//! │  │ • delete (Admin +  │  │                    │  │                  │  │
//! │  │   enable_delete)   │  │                    │  │                  │  │
//! │  └─────────┬──────────┘  └─────────┬──────────┘  └────────┬─────────┘  │
//! │            │                       │                      │            │
//! │  ┌─────────▼──────────┐  ┌─────────▼──────────┐  ┌────────▼─────────┐  │
//! │  │  Arc<ItemStore>    │  │  TokenIssuer       │  │  TokenVerifier   │  │
//! │  │  (catalog-store)   │  │  (HS256 sign)      │  │  (HS256 verify)  │  │
//! │  └────────────────────┘  └────────────────────┘  └──────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`] for the TOML layout. Environment variables:
//! - `CATALOG_JWT_KEY` - Secret for JWT signing (required)
//! - `CATALOG_JWT_ISSUER` / `CATALOG_JWT_AUDIENCE` - Token `iss` / `aud`
//! - `CATALOG_JWT_LIFETIME_SECS` - Token lifetime (default: 7200)
//! - `CATALOG_ENABLE_DELETE` - Allow item deletion (default: false)
//! - `CATALOG_LOG_FILTER` - Log filter when `RUST_LOG` is unset

pub mod auth;
pub mod config;
pub mod error;
pub mod services;
pub mod telemetry;

use std::sync::Arc;

use tracing::info;

use catalog_store::ItemStore;

// Re-exports
pub use auth::{Claims, Credential, TokenError, TokenIssuer, TokenVerifier};
pub use config::{CatalogConfig, ConfigError};
pub use error::ApiError;
pub use services::{AuthService, ItemsService, RequestAuthenticator};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<ItemStore>,
    pub items: ItemsService,
    pub auth: AuthService,
    pub authenticator: RequestAuthenticator,
    pub config: CatalogConfig,
}

impl AppState {
    /// Builds a seeded store and every service from `config`.
    ///
    /// Fails when the token signing key is missing, so a misconfigured
    /// deployment never starts serving.
    pub fn from_config(config: CatalogConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let issuer = TokenIssuer::new(&config.jwt, config.users.clone())?;
        let verifier = TokenVerifier::new(&config.jwt)?;
        let store = Arc::new(ItemStore::with_seed_data());

        info!(
            users = config.users.len(),
            enable_delete = config.features.enable_delete,
            "Catalog state ready"
        );

        Ok(AppState {
            items: ItemsService::new(Arc::clone(&store), config.features),
            auth: AuthService::new(Arc::new(issuer)),
            authenticator: RequestAuthenticator::new(Arc::new(verifier)),
            store,
            config,
        })
    }
}
