//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{Country, User};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TokenRevocationRepository, UserRepository};
use crate::services::password::{PasswordHasher, PasswordPolicy};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::phone::{derive_country, mask_phone, normalize_phone};

/// Authentication service orchestrating the credential and token lifecycle
pub struct AuthService<U, T>
where
    U: UserRepository,
    T: TokenRevocationRepository,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService<T>>,
    /// Password hasher (bcrypt)
    password_hasher: Arc<PasswordHasher>,
    /// Password strength policy
    password_policy: PasswordPolicy,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: TokenRevocationRepository,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        password_hasher: Arc<PasswordHasher>,
        password_policy: PasswordPolicy,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            password_hasher,
            password_policy,
            config,
        }
    }

    /// Register a new user.
    ///
    /// Normalizes and validates the phone number, checks the password
    /// policy, derives the country from the phone prefix, hashes the
    /// password on the blocking pool, and persists the user. Uniqueness is
    /// enforced atomically by the repository; a lost race surfaces as
    /// `DuplicatePhone`.
    ///
    /// An explicit `country` is honored only when it matches the derived
    /// one; on conflict the derived country wins.
    pub async fn register(
        &self,
        phone_raw: &str,
        password: &str,
        country: Option<Country>,
    ) -> DomainResult<User> {
        if !self.config.allow_registration {
            return Err(DomainError::Auth(AuthError::RegistrationDisabled));
        }

        let phone_number = normalize_phone(phone_raw)?;

        self.password_policy.validate(password)?;

        let derived = derive_country(&phone_number).ok_or_else(|| DomainError::Internal {
            message: "No country rule for a normalized phone number".to_string(),
        })?;
        if let Some(requested) = country {
            if requested != derived {
                warn!(
                    phone = %mask_phone(&phone_number),
                    requested = %requested,
                    derived = %derived,
                    "Requested country conflicts with phone prefix; using derived country"
                );
            }
        }

        let password_hash = self.hash_password(password).await?;

        let user = User::new(phone_number, derived, password_hash);
        let user = self.user_repository.create(user).await?;

        info!(user_id = %user.id, phone = %mask_phone(&user.phone_number), "User registered");
        Ok(user)
    }

    /// Authenticate a user and issue a token pair.
    ///
    /// A missing user and a wrong password both return
    /// `InvalidCredentials`; a disabled account with correct credentials
    /// returns `AccountDisabled`. Updates the last-login timestamp.
    pub async fn login(&self, phone_raw: &str, password: &str) -> DomainResult<(TokenPair, User)> {
        // An un-normalizable phone cannot belong to any account; fold it
        // into the same error as a miss to keep failures indistinguishable
        let phone_number = match normalize_phone(phone_raw) {
            Ok(phone) => phone,
            Err(_) => return Err(DomainError::Auth(AuthError::InvalidCredentials)),
        };

        let user = self
            .user_repository
            .find_by_phone(&phone_number)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        let password_ok = self.verify_password(password, &user.password_hash).await?;
        if !password_ok {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        if !user.is_active {
            warn!(user_id = %user.id, "Login attempt on disabled account");
            return Err(DomainError::Auth(AuthError::AccountDisabled));
        }

        let mut user = user;
        user.update_last_login();
        let user = self.user_repository.update(user).await?;

        let tokens = self.token_service.issue_tokens(user.id)?;

        info!(user_id = %user.id, "User logged in");
        Ok((tokens, user))
    }

    /// Revoke a refresh token (logout).
    ///
    /// The already-issued access token is untouched and remains valid
    /// until its own expiry.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        self.token_service.revoke_refresh_token(refresh_token).await
    }

    /// Exchange a valid, unrevoked refresh token for a new access token
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<String> {
        self.token_service.refresh_access_token(refresh_token).await
    }

    /// Fetch a user's profile by id
    pub async fn get_profile(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "User".to_string(),
            })
    }

    /// Update the self-service profile fields.
    ///
    /// Country is the only field a user may change about themself; phone
    /// number, verification, and the administrative flags are off limits
    /// on this path.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        country: Option<Country>,
    ) -> DomainResult<User> {
        let mut user = self.get_profile(user_id).await?;

        if let Some(country) = country {
            user.set_country(country);
        }

        self.user_repository.update(user).await
    }

    /// Change a user's password after verifying the current one
    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        let old_ok = self
            .verify_password(old_password, &user.password_hash)
            .await?;
        if !old_ok {
            return Err(DomainError::Auth(AuthError::WrongOldPassword));
        }

        self.password_policy.validate(new_password)?;

        let password_hash = self.hash_password(new_password).await?;

        let mut user = user;
        user.set_password_hash(password_hash);
        self.user_repository.update(user).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Run the deliberately slow bcrypt hash on the blocking pool
    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let hasher = Arc::clone(&self.password_hasher);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Hashing task failed: {}", e),
            })?
    }

    /// Run bcrypt verification on the blocking pool
    async fn verify_password(&self, password: &str, stored_hash: &str) -> DomainResult<bool> {
        let hasher = Arc::clone(&self.password_hasher);
        let password = password.to_string();
        let stored_hash = stored_hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Verification task failed: {}", e),
            })?
    }
}
