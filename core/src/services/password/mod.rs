//! Password hashing and strength policy.

pub mod hasher;
pub mod policy;

pub use hasher::PasswordHasher;
pub use policy::{PasswordPolicy, PasswordRule};
