//! MySQL implementation of the TokenRevocationRepository trait.
//!
//! The blacklist is append-only: `revoke` uses `INSERT IGNORE` keyed on
//! the jti, which makes revocation both atomic and idempotent. Rows are
//! only ever removed by `delete_expired`, and only once the token they
//! describe would fail verification anyway.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row};

use da_core::domain::entities::token::RevokedToken;
use da_core::errors::DomainError;
use da_core::repositories::TokenRevocationRepository;

/// MySQL implementation of TokenRevocationRepository
pub struct MySqlTokenRevocationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRevocationRepository {
    /// Create a new MySQL revocation store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRevocationRepository for MySqlTokenRevocationRepository {
    async fn revoke(&self, entry: RevokedToken) -> Result<(), DomainError> {
        let query = r#"
            INSERT IGNORE INTO revoked_tokens (jti, user_id, expires_at, revoked_at)
            VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&entry.jti)
            .bind(entry.user_id.to_string())
            .bind(entry.expires_at)
            .bind(entry.revoked_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to record revocation: {}", e),
            })?;

        tracing::debug!(jti = %entry.jti, "Refresh token revoked");
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = ?) AS revoked
        "#;

        let row = sqlx::query(query)
            .bind(jti)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to check revocation: {}", e),
            })?;

        let revoked: i8 = row.try_get("revoked").map_err(|e| DomainError::Database {
            message: format!("Failed to get revocation result: {}", e),
        })?;

        Ok(revoked == 1)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let query = "DELETE FROM revoked_tokens WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to prune revocations: {}", e),
            })?;

        let deleted = result.rows_affected() as usize;
        if deleted > 0 {
            tracing::debug!(deleted, "Pruned expired revocation entries");
        }
        Ok(deleted)
    }
}
