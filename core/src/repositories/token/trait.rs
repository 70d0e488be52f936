//! Revocation-store trait for refresh tokens.

use async_trait::async_trait;

use crate::domain::entities::token::RevokedToken;
use crate::errors::DomainError;

/// Repository trait for the refresh-token blacklist
///
/// Revocation is monotonic: an entry, once written, is never updated or
/// removed except by expiry pruning. `revoke` is insert-if-absent and
/// idempotent, so revoking an already-revoked token succeeds.
#[async_trait]
pub trait TokenRevocationRepository: Send + Sync {
    /// Record a refresh token as revoked.
    ///
    /// # Returns
    /// * `Ok(())` - Entry written (or already present)
    /// * `Err(DomainError)` - Database error occurred
    async fn revoke(&self, entry: RevokedToken) -> Result<(), DomainError>;

    /// Check whether a token's JWT ID has been revoked.
    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError>;

    /// Delete entries whose token has passed its natural expiry.
    ///
    /// Pruning is an optimization only; expired tokens are already
    /// rejected during verification.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries deleted
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
