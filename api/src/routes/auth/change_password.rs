use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{ChangePasswordRequest, MessageResponse};
use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::auth::AuthContext;

use da_core::errors::{AuthError, DomainError};
use da_core::repositories::{TokenRevocationRepository, UserRepository};

use super::register::validation_error_response;
use super::AppState;

/// Handler for POST /api/v1/auth/change_password
///
/// Replaces the authenticated user's password after verifying the
/// current one.
///
/// # Request Body
///
/// ```json
/// {
///     "old_password": "Passw0rd",
///     "new_password": "NewPassw0rd",
///     "new_password_confirm": "NewPassw0rd"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Password changed successfully"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: wrong old password, weak or mismatched new password
/// - 401 Unauthorized: missing or invalid access token
pub async fn change_password<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRevocationRepository + 'static,
{
    if let Err(validation_errors) = request.validate() {
        return validation_error_response(&validation_errors);
    }

    if request.new_password != request.new_password_confirm {
        return handle_domain_error(&DomainError::Auth(AuthError::PasswordMismatch));
    }

    match state
        .auth_service
        .change_password(auth.user_id, &request.old_password, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password changed successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
