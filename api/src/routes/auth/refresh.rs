use actix_web::{web, HttpResponse};

use crate::dto::auth_dto::{RefreshTokenRequest, RefreshTokenResponse};
use crate::handlers::error_handler::handle_domain_error;

use da_core::repositories::{TokenRevocationRepository, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/token/refresh
///
/// Exchanges a valid, unrevoked refresh token for a new access token.
/// The refresh token is not rotated.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: expired, malformed, or revoked refresh token
pub async fn refresh_token<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRevocationRepository + 'static,
{
    match state.auth_service.refresh_token(&request.refresh).await {
        Ok(access) => HttpResponse::Ok().json(RefreshTokenResponse { access }),
        Err(error) => handle_domain_error(&error),
    }
}
