//! Request and response data transfer objects.

pub mod auth_dto;

pub use auth_dto::*;
