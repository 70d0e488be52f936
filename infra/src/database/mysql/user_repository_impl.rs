//! MySQL implementation of the UserRepository trait.
//!
//! Uniqueness of the phone number is delegated entirely to the unique
//! index; `create` issues a plain INSERT and translates the constraint
//! violation, so concurrent registrations for the same number cannot both
//! succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use da_core::domain::entities::user::{Country, User};
use da_core::errors::{AuthError, DomainError};
use da_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database { message: format!("Failed to get id: {}", e) })?;

        let country: String = row.try_get("country").map_err(|e| DomainError::Database {
            message: format!("Failed to get country: {}", e),
        })?;
        let country = Country::parse(&country).ok_or_else(|| DomainError::Database {
            message: format!("Unknown country value: {}", country),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            phone_number: row.try_get("phone_number").map_err(|e| DomainError::Database {
                message: format!("Failed to get phone_number: {}", e),
            })?,
            country,
            password_hash: row.try_get("password_hash").map_err(|e| DomainError::Database {
                message: format!("Failed to get password_hash: {}", e),
            })?,
            is_verified: row.try_get("is_verified").map_err(|e| DomainError::Database {
                message: format!("Failed to get is_verified: {}", e),
            })?,
            is_active: row.try_get("is_active").map_err(|e| DomainError::Database {
                message: format!("Failed to get is_active: {}", e),
            })?,
            is_staff: row.try_get("is_staff").map_err(|e| DomainError::Database {
                message: format!("Failed to get is_staff: {}", e),
            })?,
            is_superuser: row.try_get("is_superuser").map_err(|e| DomainError::Database {
                message: format!("Failed to get is_superuser: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
            last_login_at: row.try_get("last_login_at").map_err(|e| DomainError::Database {
                message: format!("Failed to get last_login_at: {}", e),
            })?,
        })
    }
}

const USER_COLUMNS: &str = r#"
    id, phone_number, country, password_hash,
    is_verified, is_active, is_staff, is_superuser,
    created_at, updated_at, last_login_at
"#;

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, phone_number, country, password_hash,
                is_verified, is_active, is_staff, is_superuser,
                created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.phone_number)
            .bind(user.country.as_str())
            .bind(&user.password_hash)
            .bind(user.is_verified)
            .bind(user.is_active)
            .bind(user.is_staff)
            .bind(user.is_superuser)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db)
                    if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
                {
                    DomainError::Auth(AuthError::DuplicatePhone)
                }
                _ => DomainError::Database {
                    message: format!("Failed to create user: {}", e),
                },
            })?;

        Ok(user)
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE phone_number = ? LIMIT 1"
        );

        let result = sqlx::query(&query)
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                country = ?,
                password_hash = ?,
                is_verified = ?,
                is_active = ?,
                is_staff = ?,
                is_superuser = ?,
                updated_at = ?,
                last_login_at = ?
            WHERE id = ?
        "#;

        let updated_at = Utc::now();
        let result = sqlx::query(query)
            .bind(user.country.as_str())
            .bind(&user.password_hash)
            .bind(user.is_verified)
            .bind(user.is_active)
            .bind(user.is_staff)
            .bind(user.is_superuser)
            .bind(updated_at)
            .bind(user.last_login_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update user: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        let mut updated_user = user;
        updated_user.updated_at = updated_at;
        Ok(updated_user)
    }
}
