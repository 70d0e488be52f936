use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, UserSummary};
use crate::handlers::error_handler::handle_domain_error;

use da_core::repositories::{TokenRevocationRepository, UserRepository};

use super::register::validation_error_response;
use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Authenticates with phone number and password and returns a JWT pair.
///
/// # Request Body
///
/// ```json
/// {
///     "phone_number": "+998901234567",
///     "password": "Passw0rd"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access": "eyJ...",
///     "refresh": "eyJ...",
///     "user": { "id": "...", "phone_number": "+998901234567", "country": "Uzbekistan", "is_verified": false }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid credentials (one generic body for a wrong
///   password and an unknown phone) or disabled account
pub async fn login<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRevocationRepository + 'static,
{
    if let Err(validation_errors) = request.validate() {
        return validation_error_response(&validation_errors);
    }

    match state
        .auth_service
        .login(&request.phone_number, &request.password)
        .await
    {
        Ok((tokens, user)) => HttpResponse::Ok().json(LoginResponse {
            access: tokens.access_token,
            refresh: tokens.refresh_token,
            user: UserSummary::from(&user),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
