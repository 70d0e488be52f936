//! API configuration assembled from environment variables.

use da_shared::{DatabaseConfig, Environment, JwtConfig, ServerConfig};

/// Complete configuration for the API binary
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Deployment environment
    pub environment: Environment,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Database pool settings
    pub database: DatabaseConfig,
    /// JWT signing settings
    pub jwt: JwtConfig,
}

impl ApiConfig {
    /// Load configuration from the environment (after `.env` has been read)
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let config = Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
        };

        if environment.is_production() && config.jwt.is_using_default_secret() {
            log::warn!("JWT_SECRET is unset in production; tokens are signed with the default development secret");
        }

        config
    }
}
