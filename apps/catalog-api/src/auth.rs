//! JWT authentication module.
//!
//! Issues bearer credentials for configured users and verifies them on the
//! way back in.
//!
//! ## Token Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  username + password ──► TokenIssuer::issue ──► HS256 JWT              │
//! │                               │                    sub, name, role,     │
//! │                               │                    iss, aud, iat, exp,  │
//! │                               │                    jti                  │
//! │                         configured users                               │
//! │                         (role comes from here,                         │
//! │                          never from the caller)                        │
//! │                                                                         │
//! │  "Bearer <jwt>" ──► extract_bearer_token ──► TokenVerifier::verify     │
//! │                                               signature, iss, aud, exp  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{AppUser, ConfigError, ConfigResult, JwtConfig};

/// Role allowed to create, update and delete items.
pub const ADMIN_ROLE: &str = "Admin";

/// Token errors.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// JWT claims structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (configured username)
    pub sub: String,

    /// Display name (same as subject)
    pub name: String,

    /// Role from configuration
    pub role: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

impl Claims {
    /// True when the bearer holds the elevated role.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// A freshly issued bearer credential.
#[derive(Debug, Clone)]
pub struct Credential {
    /// Encoded JWT.
    pub token: String,

    /// Instant the token stops being accepted.
    pub expires_at: DateTime<Utc>,

    /// Claims written into the token.
    pub claims: Claims,
}

// =============================================================================
// Issuer
// =============================================================================

/// Signs tokens for configured users.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    audience: String,
    lifetime: Duration,
    users: Vec<AppUser>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("lifetime", &self.lifetime)
            .field("users", &self.users.len())
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Creates an issuer. Fails when no signing key is configured.
    pub fn new(jwt: &JwtConfig, users: Vec<AppUser>) -> ConfigResult<Self> {
        let key = jwt.signing_key()?;
        if jwt.lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("jwt.lifetime_secs".to_string()));
        }

        Ok(TokenIssuer {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            lifetime: Duration::seconds(jwt.lifetime_secs),
            users,
        })
    }

    /// Issues a token for `username` if `password` matches.
    ///
    /// Username lookup ignores case; the password must match exactly.
    /// `role_hint` is accepted for compatibility and otherwise ignored.
    pub fn issue(
        &self,
        username: &str,
        password: &str,
        role_hint: Option<&str>,
    ) -> Result<Credential, TokenError> {
        self.issue_at(username, password, role_hint, Utc::now())
    }

    fn issue_at(
        &self,
        username: &str,
        password: &str,
        role_hint: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Credential, TokenError> {
        let user = self.find_user(username, password).ok_or_else(|| {
            warn!(username = %username, "Rejected token request");
            TokenError::InvalidCredentials
        })?;

        if let Some(hint) = role_hint.filter(|hint| *hint != user.role) {
            warn!(
                username = %user.username,
                requested = %hint,
                "Ignoring caller-supplied role"
            );
        }

        let expires_at = now + self.lifetime;
        let claims = Claims {
            sub: user.username.clone(),
            name: user.username.clone(),
            role: user.role.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        info!(
            sub = %claims.sub,
            role = %claims.role,
            jti = %claims.jti,
            "Token issued"
        );

        Ok(Credential {
            token,
            expires_at,
            claims,
        })
    }

    fn find_user(&self, username: &str, password: &str) -> Option<&AppUser> {
        let wanted = username.to_lowercase();
        self.users
            .iter()
            .find(|user| user.username.to_lowercase() == wanted && user.password == password)
    }
}

// =============================================================================
// Verifier
// =============================================================================

/// Checks tokens produced by [`TokenIssuer`] with the same key material.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier").finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Creates a verifier. Fails when no signing key is configured.
    pub fn new(jwt: &JwtConfig) -> ConfigResult<Self> {
        let key = jwt.signing_key()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[jwt.issuer.as_str()]);
        validation.set_audience(&[jwt.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Ok(TokenVerifier {
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
        })
    }

    /// Validates signature, issuer, audience and expiry, then returns the
    /// claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .trim()
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
