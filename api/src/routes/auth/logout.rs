use actix_web::{web, HttpResponse};

use crate::dto::auth_dto::{LogoutRequest, MessageResponse};
use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::auth::AuthContext;

use da_core::repositories::{TokenRevocationRepository, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the supplied refresh token. Requires authentication via a
/// Bearer access token; that access token itself stays valid until its
/// own expiry.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
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
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: malformed or expired refresh token
/// - 401 Unauthorized: missing or invalid access token
pub async fn logout<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
    request: web::Json<LogoutRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRevocationRepository + 'static,
{
    match state.auth_service.logout(&request.refresh).await {
        Ok(()) => {
            log::info!("User {} logged out", auth.user_id);
            HttpResponse::Ok().json(MessageResponse::new("Logged out successfully"))
        }
        Err(error) => handle_domain_error(&error),
    }
}
