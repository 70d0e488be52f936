//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
///
/// # Uniqueness
/// `create` must be atomic create-if-absent: the storage layer enforces the
/// unique phone-number constraint, and a violation surfaces as
/// `AuthError::DuplicatePhone`. Duplicate detection must never be a plain
/// read followed by a write.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user.
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::DuplicatePhone))` - Phone already registered
    /// * `Err(DomainError)` - Database or other error occurred
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Find a user by their canonical phone number.
    ///
    /// # Arguments
    /// * `phone_number` - Canonical phone number (e.g. `+998901234567`)
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Update an existing user (profile fields, password hash, timestamps).
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError::NotFound)` - No user with the given id
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
