//! MySQL repository implementations.

pub mod token_repository_impl;
pub mod user_repository_impl;

pub use token_repository_impl::MySqlTokenRevocationRepository;
pub use user_repository_impl::MySqlUserRepository;
