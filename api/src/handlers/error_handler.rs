//! Maps domain errors onto HTTP responses.
//!
//! Validation-kind failures carry field-level details with a 400;
//! credential failures share one generic 400 body so a caller cannot tell
//! a wrong password from an unknown phone number; token failures on the
//! explicit token endpoints are 400; everything internal is an opaque 500.

use actix_web::HttpResponse;

use da_core::errors::{AuthError, DomainError, TokenError};
use da_shared::ErrorResponse;

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => handle_auth_error(auth_error),
        DomainError::Token(token_error) => handle_token_error(token_error),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            format!("{} not found", resource),
        )),
        DomainError::Unauthorized => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("unauthorized", "Authentication required")),
        DomainError::Database { message } | DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "An internal error occurred",
            ))
        }
    }
}

fn handle_auth_error(error: &AuthError) -> HttpResponse {
    match error {
        AuthError::InvalidPhoneFormat { .. } => HttpResponse::BadRequest().json(
            ErrorResponse::new("invalid_phone_format", "Invalid phone number format")
                .with_field_error(
                    "phone_number",
                    "Invalid phone number format. Valid formats: Uzbekistan: +998901234567, \
                     Russia: +79123456789, USA: +11234567890",
                ),
        ),
        AuthError::DuplicatePhone => HttpResponse::BadRequest().json(
            ErrorResponse::new("duplicate_phone", "Phone number already registered")
                .with_field_error(
                    "phone_number",
                    "User with this phone number already exists.",
                ),
        ),
        AuthError::WeakPassword { reason } => HttpResponse::BadRequest().json(
            ErrorResponse::new("weak_password", "Password rejected")
                .with_field_error("password", reason.clone()),
        ),
        AuthError::PasswordMismatch => HttpResponse::BadRequest().json(
            ErrorResponse::new("password_mismatch", "Passwords do not match")
                .with_field_error("password_confirm", "Passwords do not match."),
        ),
        // Deliberately identical body for a wrong password and an unknown phone
        AuthError::InvalidCredentials => HttpResponse::BadRequest().json(ErrorResponse::new(
            "invalid_credentials",
            "Invalid phone number or password.",
        )),
        AuthError::AccountDisabled => HttpResponse::BadRequest().json(ErrorResponse::new(
            "account_disabled",
            "User account is disabled.",
        )),
        AuthError::WrongOldPassword => HttpResponse::BadRequest().json(
            ErrorResponse::new("wrong_old_password", "Old password is incorrect")
                .with_field_error("old_password", "Old password is incorrect."),
        ),
        AuthError::UserNotFound => {
            HttpResponse::NotFound().json(ErrorResponse::new("user_not_found", "User not found"))
        }
        AuthError::RegistrationDisabled => HttpResponse::Forbidden().json(ErrorResponse::new(
            "registration_disabled",
            "Registration is currently disabled",
        )),
    }
}

fn handle_token_error(error: &TokenError) -> HttpResponse {
    let (code, message) = match error {
        TokenError::TokenExpired => ("token_expired", "Token has expired"),
        TokenError::TokenRevoked => ("token_revoked", "Token has been revoked"),
        TokenError::InvalidSignature => ("invalid_token", "Token signature verification failed"),
        TokenError::TokenNotYetValid => ("invalid_token", "Token is not yet valid"),
        TokenError::InvalidClaims | TokenError::InvalidTokenFormat => {
            ("invalid_token", "Invalid token")
        }
        TokenError::TokenGenerationFailed => {
            log::error!("Token generation failed");
            return HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "An internal error occurred",
            ));
        }
    };

    HttpResponse::BadRequest().json(ErrorResponse::new(code, message))
}
