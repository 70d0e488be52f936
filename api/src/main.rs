use std::io;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use log::info;

use da_api::app::create_app;
use da_api::config::ApiConfig;
use da_api::routes::auth::AppState;

use da_core::services::auth::{AuthService, AuthServiceConfig};
use da_core::services::password::{PasswordHasher, PasswordPolicy};
use da_core::services::token::{TokenService, TokenServiceConfig};
use da_infra::{create_pool, MySqlTokenRevocationRepository, MySqlUserRepository};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting DialAuth API server");

    let config = ApiConfig::from_env();
    let bind_address = config.server.bind_address();

    // Database pool and repositories
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let revocation_repository = MySqlTokenRevocationRepository::new(pool);

    // Services
    let token_service = Arc::new(TokenService::new(
        revocation_repository,
        TokenServiceConfig::from_jwt_config(&config.jwt),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_service,
        Arc::new(PasswordHasher::default()),
        PasswordPolicy::default(),
        AuthServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState { auth_service });
    let jwt_config = config.jwt.clone();

    info!("Server listening on {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone(), &jwt_config))
        .bind(&bind_address)?
        .run()
        .await
}
