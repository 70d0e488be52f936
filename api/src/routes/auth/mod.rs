//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints:
//! - Registration and login
//! - Logout (refresh-token revocation)
//! - Access-token refresh
//! - Profile read/update
//! - Password change

pub mod change_password;
pub mod login;
pub mod logout;
pub mod profile;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use da_core::repositories::{TokenRevocationRepository, UserRepository};
use da_core::services::auth::AuthService;

/// Application state that holds shared services
pub struct AppState<U, T>
where
    U: UserRepository,
    T: TokenRevocationRepository,
{
    pub auth_service: Arc<AuthService<U, T>>,
}
