//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Default refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "dialauth";

/// JWT audience
pub const JWT_AUDIENCE: &str = "dialauth-api";

/// Distinguishes access tokens from refresh tokens inside the claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Whether this is an access or a refresh token
    pub token_type: TokenType,
}

impl Claims {
    /// Creates new claims for an access token
    pub fn new_access_token(user_id: Uuid, issuer: &str, audience: &str, ttl: Duration) -> Self {
        Self::new(user_id, issuer, audience, ttl, TokenType::Access)
    }

    /// Creates new claims for a refresh token
    pub fn new_refresh_token(user_id: Uuid, issuer: &str, audience: &str, ttl: Duration) -> Self {
        Self::new(user_id, issuer, audience, ttl, TokenType::Refresh)
    }

    fn new(user_id: Uuid, issuer: &str, audience: &str, ttl: Duration, token_type: TokenType) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks if the claims are currently valid (after nbf, before exp)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// The token's expiry as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.exp, 0)
    }
}

/// Revocation record for a refresh token, keyed by its JWT ID.
///
/// Entries are written at logout and never updated; a jti present in the
/// store is revoked forever. Rows whose `expires_at` has passed may be
/// pruned since expired tokens already fail signature validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedToken {
    /// JWT ID of the revoked refresh token
    pub jti: String,

    /// User the token belonged to
    pub user_id: Uuid,

    /// Natural expiry of the revoked token, kept for pruning
    pub expires_at: DateTime<Utc>,

    /// When the token was revoked
    pub revoked_at: DateTime<Utc>,
}

impl RevokedToken {
    /// Creates a new revocation record
    pub fn new(jti: String, user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            jti,
            user_id,
            expires_at,
            revoked_at: Utc::now(),
        }
    }

    /// Checks if the underlying token's natural expiry has passed
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with its expiry windows in seconds
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
