//! Main token service implementation

use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RevokedToken, TokenPair, TokenType};
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRevocationRepository;

use super::config::TokenServiceConfig;

/// Service for minting and validating JWT access and refresh tokens.
///
/// Tokens are self-contained: validation needs no store lookup except the
/// revocation check performed for refresh tokens. The signing key is fixed
/// at construction.
pub struct TokenService<R: TokenRevocationRepository> {
    repository: R,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRevocationRepository> TokenService<R> {
    /// Creates a new token service instance
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Mints an access + refresh token pair for a user.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The signed pair with its expiry windows
    /// * `Err(DomainError)` - Token generation failed
    pub fn issue_tokens(&self, user_id: Uuid) -> Result<TokenPair, DomainError> {
        let access_token = self.generate_access_token(user_id)?;

        let refresh_claims = Claims::new_refresh_token(
            user_id,
            &self.config.issuer,
            &self.config.audience,
            Duration::days(self.config.refresh_token_expiry_days),
        );
        let refresh_token = self.encode_jwt(&refresh_claims)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry_minutes * 60,
            self.config.refresh_token_expiry_days * 24 * 60 * 60,
        ))
    }

    /// Generates a signed access token
    fn generate_access_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            user_id,
            &self.config.issuer,
            &self.config.audience,
            Duration::minutes(self.config.access_token_expiry_minutes),
        );
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Decodes a JWT and maps library errors onto domain token errors
    fn decode_jwt(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::TokenExpired)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        DomainError::Token(TokenError::TokenNotYetValid)
                    }
                    _ => DomainError::Token(TokenError::InvalidTokenFormat),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Verifies an access token and returns its claims.
    ///
    /// Access tokens are never blacklisted; they stay valid until expiry
    /// even after the matching refresh token is revoked.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.decode_jwt(token)?;

        if claims.token_type != TokenType::Access {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }

        Ok(claims)
    }

    /// Verifies a refresh token, including the revocation check.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid and not revoked
    /// * `Err(TokenError)` - Expired, malformed, wrong type, or revoked
    pub async fn verify_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.decode_jwt(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }

        if self.repository.is_revoked(&claims.jti).await? {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        Ok(claims)
    }

    /// Exchanges a valid refresh token for a new access token.
    ///
    /// The refresh token is not rotated; it remains usable until its own
    /// expiry or an explicit revocation.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, DomainError> {
        let claims = self.verify_refresh_token(refresh_token).await?;

        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;

        self.generate_access_token(user_id)
    }

    /// Revokes a refresh token by recording its JWT ID in the blacklist.
    ///
    /// The input must still decode (signature and expiry intact); a token
    /// expired beyond parse is rejected rather than silently accepted.
    /// Revoking an already-revoked token succeeds.
    pub async fn revoke_refresh_token(&self, refresh_token: &str) -> Result<(), DomainError> {
        let claims = self.decode_jwt(refresh_token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }

        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;

        let expires_at = claims
            .expires_at()
            .ok_or(DomainError::Token(TokenError::InvalidClaims))?;

        let entry = RevokedToken::new(claims.jti, user_id, expires_at);
        self.repository.revoke(entry).await
    }

    /// Removes blacklist entries whose token has expired naturally.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of entries pruned
    pub async fn cleanup_expired(&self) -> Result<usize, DomainError> {
        self.repository.delete_expired().await
    }
}
