//! End-to-end tests for the authentication endpoints, run against
//! in-memory repositories.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use da_api::app::create_app;
use da_api::routes::auth::AppState;

use da_core::domain::entities::token::RevokedToken;
use da_core::domain::entities::user::User;
use da_core::errors::{AuthError, DomainError};
use da_core::repositories::{TokenRevocationRepository, UserRepository};
use da_core::services::auth::{AuthService, AuthServiceConfig};
use da_core::services::password::{PasswordHasher, PasswordPolicy};
use da_core::services::token::{TokenService, TokenServiceConfig};
use da_shared::JwtConfig;

const UZ_PHONE: &str = "+998901234567";
const PASSWORD: &str = "Passw0rd";

/// In-memory user store; the duplicate check happens inside the write
/// lock, mirroring the database unique constraint.
struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.phone_number == user.phone_number) {
            return Err(DomainError::Auth(AuthError::DuplicatePhone));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// In-memory revocation store keyed by jti
struct InMemoryRevocationRepository {
    entries: RwLock<HashMap<String, RevokedToken>>,
}

impl InMemoryRevocationRepository {
    fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TokenRevocationRepository for InMemoryRevocationRepository {
    async fn revoke(&self, entry: RevokedToken) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.entry(entry.jti.clone()).or_insert(entry);
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.contains_key(jti))
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired());
        Ok(before - entries.len())
    }
}

fn test_jwt_config() -> JwtConfig {
    JwtConfig::new("integration-test-secret")
}

fn test_app_state() -> web::Data<AppState<InMemoryUserRepository, InMemoryRevocationRepository>> {
    let jwt = test_jwt_config();
    let token_service = TokenService::new(
        InMemoryRevocationRepository::new(),
        TokenServiceConfig::from_jwt_config(&jwt),
    );

    let auth_service = AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(token_service),
        // Minimum bcrypt cost keeps the suite fast
        Arc::new(PasswordHasher::new(4)),
        PasswordPolicy::default(),
        AuthServiceConfig::default(),
    );

    web::Data::new(AppState {
        auth_service: Arc::new(auth_service),
    })
}

fn register_body(phone: &str) -> serde_json::Value {
    serde_json::json!({
        "phone_number": phone,
        "password": PASSWORD,
        "password_confirm": PASSWORD,
    })
}

fn login_body(phone: &str, password: &str) -> serde_json::Value {
    serde_json::json!({
        "phone_number": phone,
        "password": password,
    })
}

#[actix_rt::test]
async fn test_full_auth_lifecycle() {
    let state = test_app_state();
    let jwt = test_jwt_config();
    let app = test::init_service(create_app(state, &jwt)).await;

    // Register
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body(UZ_PHONE))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User registered successfully");
    assert!(body["user_id"].is_string());

    // Login
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(login_body(UZ_PHONE, PASSWORD))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let access = body["access"].as_str().unwrap().to_string();
    let refresh = body["refresh"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["phone_number"], UZ_PHONE);
    assert_eq!(body["user"]["country"], "Uzbekistan");

    // Profile with the access token
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/profile")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["phone_number"], UZ_PHONE);
    assert!(body["last_login_at"].is_string());

    // Refresh works before logout
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/token/refresh")
            .set_json(serde_json::json!({ "refresh": refresh }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["access"].is_string());

    // Logout revokes the refresh token
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .set_json(serde_json::json!({ "refresh": refresh }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Refresh now fails with a revocation error
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/token/refresh")
            .set_json(serde_json::json!({ "refresh": refresh }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "token_revoked");

    // The already-issued access token keeps working until it expires
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/profile")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_register_validation_failures() {
    let state = test_app_state();
    let jwt = test_jwt_config();
    let app = test::init_service(create_app(state, &jwt)).await;

    // Mismatched confirmation
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(serde_json::json!({
                "phone_number": UZ_PHONE,
                "password": PASSWORD,
                "password_confirm": "Different1",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "password_mismatch");
    assert!(body["details"]["password_confirm"].is_array());

    // Weak password (no uppercase)
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(serde_json::json!({
                "phone_number": UZ_PHONE,
                "password": "nouppercase1",
                "password_confirm": "nouppercase1",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "weak_password");

    // Unsupported phone number
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("+8613812345678"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_phone_format");

    // Duplicate registration
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body(UZ_PHONE))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("998 90 123-45-67"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "duplicate_phone");
}

#[actix_rt::test]
async fn test_login_failures_share_one_body() {
    let state = test_app_state();
    let jwt = test_jwt_config();
    let app = test::init_service(create_app(state, &jwt)).await;

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body(UZ_PHONE))
            .to_request(),
    )
    .await;

    // Wrong password on an existing account
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(login_body(UZ_PHONE, "WrongPass1"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let wrong_password: serde_json::Value = test::read_body_json(resp).await;

    // Unknown phone number
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(login_body("+998909999999", PASSWORD))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let unknown_phone: serde_json::Value = test::read_body_json(resp).await;

    // Same code and message either way; nothing reveals which check failed
    assert_eq!(wrong_password["error"], unknown_phone["error"]);
    assert_eq!(wrong_password["message"], unknown_phone["message"]);
    assert_eq!(wrong_password["error"], "invalid_credentials");
}

#[actix_rt::test]
async fn test_protected_routes_require_access_token() {
    let state = test_app_state();
    let jwt = test_jwt_config();
    let app = test::init_service(create_app(state, &jwt)).await;

    // No token
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/profile")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/profile")
            .insert_header(("Authorization", "Bearer garbage"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Logout is protected too
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .set_json(serde_json::json!({ "refresh": "anything" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_refresh_token_rejected_as_bearer() {
    let state = test_app_state();
    let jwt = test_jwt_config();
    let app = test::init_service(create_app(state, &jwt)).await;

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body(UZ_PHONE))
            .to_request(),
    )
    .await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(login_body(UZ_PHONE, PASSWORD))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let refresh = body["refresh"].as_str().unwrap().to_string();

    // A refresh token is not an access token
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/profile")
            .insert_header(("Authorization", format!("Bearer {}", refresh)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_refresh_with_garbage_token() {
    let state = test_app_state();
    let jwt = test_jwt_config();
    let app = test::init_service(create_app(state, &jwt)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/token/refresh")
            .set_json(serde_json::json!({ "refresh": "garbage" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_token");
}

#[actix_rt::test]
async fn test_profile_update_and_change_password() {
    let state = test_app_state();
    let jwt = test_jwt_config();
    let app = test::init_service(create_app(state, &jwt)).await;

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body(UZ_PHONE))
            .to_request(),
    )
    .await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(login_body(UZ_PHONE, PASSWORD))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let access = body["access"].as_str().unwrap().to_string();

    // Update country
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/auth/profile")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .set_json(serde_json::json!({ "country": "Russia" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["country"], "Russia");

    // Change password with the wrong old password
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/change_password")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .set_json(serde_json::json!({
                "old_password": "WrongOld1",
                "new_password": "NewPassw0rd",
                "new_password_confirm": "NewPassw0rd",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "wrong_old_password");

    // Change password for real
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/change_password")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .set_json(serde_json::json!({
                "old_password": PASSWORD,
                "new_password": "NewPassw0rd",
                "new_password_confirm": "NewPassw0rd",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Old password stops working, the new one logs in
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(login_body(UZ_PHONE, PASSWORD))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(login_body(UZ_PHONE, "NewPassw0rd"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let state = test_app_state();
    let jwt = test_jwt_config();
    let app = test::init_service(create_app(state, &jwt)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/health").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "dialauth-api");
}
