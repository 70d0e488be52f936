//! Application factory
//!
//! Builds the actix-web application with middleware, routes, and shared
//! state. The factory is generic over the repository implementations so
//! tests can run it against in-memory repositories.

use actix_web::{body::MessageBody, middleware::Logger, web, App, HttpResponse};

use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{
    change_password::change_password,
    login::login,
    logout::logout,
    profile::{get_profile, update_profile},
    refresh::refresh_token,
    register::register,
    AppState,
};

use da_core::repositories::{TokenRevocationRepository, UserRepository};
use da_shared::{ErrorResponse, JwtConfig};

/// Create and configure the application with all dependencies
pub fn create_app<U, T>(
    app_state: web::Data<AppState<U, T>>,
    jwt_config: &JwtConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRevocationRepository + 'static,
{
    let cors = create_cors();

    App::new()
        // Add application state
        .app_data(app_state)
        // Add middleware (CORS inside the logger)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<U, T>))
                    .route("/login", web::post().to(login::<U, T>))
                    .route("/token/refresh", web::post().to(refresh_token::<U, T>))
                    .service(
                        web::resource("/logout")
                            .wrap(JwtAuth::from_config(jwt_config))
                            .route(web::post().to(logout::<U, T>)),
                    )
                    .service(
                        web::resource("/profile")
                            .wrap(JwtAuth::from_config(jwt_config))
                            .route(web::get().to(get_profile::<U, T>))
                            .route(web::put().to(update_profile::<U, T>)),
                    )
                    .service(
                        web::resource("/change_password")
                            .wrap(JwtAuth::from_config(jwt_config))
                            .route(web::post().to(change_password::<U, T>)),
                    ),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "dialauth-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
