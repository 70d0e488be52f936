//! Configuration for the token service

use jsonwebtoken::Algorithm;

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_DAYS,
};

/// Configuration for the token service
///
/// The signing secret is process-wide state: loaded once at startup and
/// handed to `TokenService` at construction, never looked up ambiently.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Issuer claim stamped into and required from every token
    pub issuer: String,
    /// Audience claim stamped into and required from every token
    pub audience: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
        }
    }
}

impl TokenServiceConfig {
    /// Build from the shared JWT configuration loaded at startup
    pub fn from_jwt_config(config: &da_shared::JwtConfig) -> Self {
        let algorithm = match config.algorithm.as_str() {
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            _ => Algorithm::HS256,
        };

        Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_expiry_minutes: config.access_token_expiry / 60,
            refresh_token_expiry_days: config.refresh_token_expiry / 86400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TokenServiceConfig::default();
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.access_token_expiry_minutes, 15);
        assert_eq!(config.refresh_token_expiry_days, 7);
        assert_eq!(config.issuer, "dialauth");
    }

    #[test]
    fn test_from_jwt_config() {
        let jwt = da_shared::JwtConfig::new("unit-test-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);
        let config = TokenServiceConfig::from_jwt_config(&jwt);

        assert_eq!(config.jwt_secret, "unit-test-secret");
        assert_eq!(config.access_token_expiry_minutes, 30);
        assert_eq!(config.refresh_token_expiry_days, 14);
        assert_eq!(config.algorithm, Algorithm::HS256);
    }
}
