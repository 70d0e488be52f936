//! Domain-specific error types for authentication and token operations
//!
//! Error messages here are for operators and logs; user-facing wording is
//! decided in the presentation layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid phone format: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("User with this phone number already exists")]
    DuplicatePhone,

    #[error("Password rejected: {reason}")]
    WeakPassword { reason: String },

    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Wrong phone or wrong password; the two cases are deliberately
    /// indistinguishable to the caller.
    #[error("Invalid phone number or password")]
    InvalidCredentials,

    #[error("User account is disabled")]
    AccountDisabled,

    #[error("Old password is incorrect")]
    WrongOldPassword,

    #[error("User not found")]
    UserNotFound,

    #[error("Registration is currently disabled")]
    RegistrationDisabled,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
