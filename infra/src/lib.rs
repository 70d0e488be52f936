//! # DialAuth Infrastructure
//!
//! MySQL-backed implementations of the core repository traits, plus
//! connection-pool construction. Everything here speaks the domain
//! language of `da_core`; SQL stays behind this boundary.

pub mod database;

pub use database::connection::create_pool;
pub use database::mysql::{MySqlTokenRevocationRepository, MySqlUserRepository};
