use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{RegisterRequest, RegisterResponse};
use crate::handlers::error_handler::handle_domain_error;

use da_core::errors::{AuthError, DomainError};
use da_core::repositories::{TokenRevocationRepository, UserRepository};
use da_core::services::auth::mask_phone;
use da_shared::ErrorResponse;

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Registers a new user with phone number and password.
///
/// # Request Body
///
/// ```json
/// {
///     "phone_number": "+998901234567",
///     "password": "Passw0rd",
///     "password_confirm": "Passw0rd",
///     "country": "Uzbekistan"
/// }
/// ```
///
/// The country field is optional; it is derived from the phone prefix and
/// a conflicting value is overridden by the derived one.
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "message": "User registered successfully",
///     "user_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid phone format, weak password, mismatched
///   confirmation, or duplicate phone number (field-level details)
pub async fn register<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRevocationRepository + 'static,
{
    if let Err(validation_errors) = request.validate() {
        return validation_error_response(&validation_errors);
    }

    if request.password != request.password_confirm {
        return handle_domain_error(&DomainError::Auth(AuthError::PasswordMismatch));
    }

    match state
        .auth_service
        .register(&request.phone_number, &request.password, request.country)
        .await
    {
        Ok(user) => {
            log::info!(
                "Registered user {} ({})",
                user.id,
                mask_phone(&user.phone_number)
            );
            HttpResponse::Created().json(RegisterResponse {
                message: "User registered successfully".to_string(),
                user_id: user.id,
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}

/// Convert `validator` output into the standard field-error body
pub(crate) fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new("validation_error", "Invalid request data");

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            response = response.with_field_error(field.to_string(), message);
        }
    }

    HttpResponse::BadRequest().json(response)
}
