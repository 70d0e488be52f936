//! Mock implementation of TokenRevocationRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RevokedToken;
use crate::errors::DomainError;

use super::trait_::TokenRevocationRepository;

/// Mock revocation store for testing
pub struct MockTokenRevocationRepository {
    entries: Arc<RwLock<HashMap<String, RevokedToken>>>,
}

impl MockTokenRevocationRepository {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockTokenRevocationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRevocationRepository for MockTokenRevocationRepository {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_revoke_and_check() {
        let repo = MockTokenRevocationRepository::new();
        let entry = RevokedToken::new(
            "jti-1".to_string(),
            Uuid::new_v4(),
            Utc::now() + Duration::days(7),
        );

        assert!(!repo.is_revoked("jti-1").await.unwrap());
        repo.revoke(entry).await.unwrap();
        assert!(repo.is_revoked("jti-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let repo = MockTokenRevocationRepository::new();
        let user_id = Uuid::new_v4();
        let expires = Utc::now() + Duration::days(7);

        repo.revoke(RevokedToken::new("jti-1".to_string(), user_id, expires))
            .await
            .unwrap();
        repo.revoke(RevokedToken::new("jti-1".to_string(), user_id, expires))
            .await
            .unwrap();

        assert!(repo.is_revoked("jti-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_expired_keeps_live_entries() {
        let repo = MockTokenRevocationRepository::new();
        let user_id = Uuid::new_v4();

        repo.revoke(RevokedToken::new(
            "live".to_string(),
            user_id,
            Utc::now() + Duration::days(1),
        ))
        .await
        .unwrap();
        repo.revoke(RevokedToken::new(
            "stale".to_string(),
            user_id,
            Utc::now() - Duration::days(1),
        ))
        .await
        .unwrap();

        let deleted = repo.delete_expired().await.unwrap();
        assert_eq!(deleted, 1);
        assert!(repo.is_revoked("live").await.unwrap());
        assert!(!repo.is_revoked("stale").await.unwrap());
    }
}
