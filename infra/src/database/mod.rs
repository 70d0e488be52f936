//! Database layer: pool construction and MySQL repository implementations.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE users (
//!     id            CHAR(36)     NOT NULL PRIMARY KEY,
//!     phone_number  VARCHAR(16)  NOT NULL,
//!     country       VARCHAR(20)  NOT NULL,
//!     password_hash VARCHAR(255) NOT NULL,
//!     is_verified   BOOLEAN      NOT NULL DEFAULT FALSE,
//!     is_active     BOOLEAN      NOT NULL DEFAULT TRUE,
//!     is_staff      BOOLEAN      NOT NULL DEFAULT FALSE,
//!     is_superuser  BOOLEAN      NOT NULL DEFAULT FALSE,
//!     created_at    TIMESTAMP(6) NOT NULL,
//!     updated_at    TIMESTAMP(6) NOT NULL,
//!     last_login_at TIMESTAMP(6) NULL,
//!     UNIQUE KEY uq_users_phone_number (phone_number)
//! );
//!
//! CREATE TABLE revoked_tokens (
//!     jti        CHAR(36)     NOT NULL PRIMARY KEY,
//!     user_id    CHAR(36)     NOT NULL,
//!     expires_at TIMESTAMP(6) NOT NULL,
//!     revoked_at TIMESTAMP(6) NOT NULL,
//!     KEY idx_revoked_tokens_expires_at (expires_at)
//! );
//! ```
//!
//! The unique key on `phone_number` is what makes registration's
//! create-if-absent atomic; the repositories map the violation back to a
//! domain error instead of pre-checking.

pub mod connection;
pub mod mysql;
