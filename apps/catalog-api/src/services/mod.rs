//! Request-layer services.
//!
//! Each service validates input, enforces role gating and translates
//! outcomes into [`ApiError`](crate::error::ApiError) variants.

pub mod auth_service;
pub mod items_service;

pub use auth_service::{AuthService, RequestAuthenticator, TokenRequest, TokenResponse};
pub use items_service::{ItemListResponse, ItemsService, ListItemsParams};
