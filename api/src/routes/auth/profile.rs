use actix_web::{web, HttpResponse};

use crate::dto::auth_dto::{ProfileResponse, UpdateProfileRequest};
use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::auth::AuthContext;

use da_core::repositories::{TokenRevocationRepository, UserRepository};

use super::AppState;

/// Handler for GET /api/v1/auth/profile
///
/// Returns the authenticated user's profile.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "id": "550e8400-e29b-41d4-a716-446655440000",
///     "phone_number": "+998901234567",
///     "country": "Uzbekistan",
///     "is_verified": false,
///     "created_at": "2025-01-01T00:00:00Z",
///     "updated_at": "2025-01-01T00:00:00Z",
///     "last_login_at": null
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: missing or invalid access token
pub async fn get_profile<U, T>(state: web::Data<AppState<U, T>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRevocationRepository + 'static,
{
    match state.auth_service.get_profile(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(ProfileResponse::from(&user)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /api/v1/auth/profile
///
/// Updates the authenticated user's profile. Country is the only
/// self-service field; phone number, verification status, and the
/// administrative flags cannot be changed here.
///
/// # Request Body
///
/// ```json
/// {
///     "country": "Russia"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK) - the updated profile
///
/// ## Errors
/// - 400 Bad Request: unknown country value
/// - 401 Unauthorized: missing or invalid access token
pub async fn update_profile<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRevocationRepository + 'static,
{
    match state
        .auth_service
        .update_profile(auth.user_id, request.country)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(ProfileResponse::from(&user)),
        Err(error) => handle_domain_error(&error),
    }
}
