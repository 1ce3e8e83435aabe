//! Authentication service implementation.
//!
//! Exchanges a username and password for a bearer token, and turns an
//! `Authorization` header back into claims.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use catalog_core::validation::require_non_blank;

use crate::auth::{extract_bearer_token, Claims, TokenIssuer, TokenVerifier};
use crate::error::ApiError;

/// Body of a token request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    #[serde(default, alias = "username")]
    pub user_name: String,

    #[serde(default)]
    pub password: String,

    /// Accepted for compatibility; the issued role always comes from
    /// configuration.
    #[serde(default)]
    pub role: Option<String>,
}

impl TokenRequest {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        TokenRequest {
            user_name: user_name.into(),
            password: password.into(),
            role: None,
        }
    }
}

/// Body of a successful token response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Token exchange endpoint logic.
#[derive(Debug, Clone)]
pub struct AuthService {
    issuer: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(issuer: Arc<TokenIssuer>) -> Self {
        AuthService { issuer }
    }

    /// Exchange credentials for a JWT access token.
    pub fn create_token(&self, request: TokenRequest) -> Result<TokenResponse, ApiError> {
        require_non_blank(&request.user_name, "userName")?;
        require_non_blank(&request.password, "password")?;

        info!(username = %request.user_name, "Token request");

        let credential =
            self.issuer
                .issue(&request.user_name, &request.password, request.role.as_deref())?;

        Ok(TokenResponse {
            access_token: credential.token,
            expires_at: credential.expires_at,
        })
    }
}

/// Resolves the caller identity from an `Authorization` header.
#[derive(Debug, Clone)]
pub struct RequestAuthenticator {
    verifier: Arc<TokenVerifier>,
}

impl RequestAuthenticator {
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        RequestAuthenticator { verifier }
    }

    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Claims, ApiError> {
        let header = authorization
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;
        let token = extract_bearer_token(header)
            .ok_or_else(|| ApiError::Unauthorized("Expected a Bearer token".to_string()))?;

        let claims = self.verifier.verify(token)?;
        debug!(sub = %claims.sub, role = %claims.role, "Authenticated request");
        Ok(claims)
    }
}
