//! bcrypt-backed password hashing.

use crate::errors::DomainError;

/// One-way password hasher.
///
/// Each `hash` call generates a fresh salt which bcrypt embeds in the
/// output, so verification only needs the stored hash. Verification
/// compares in constant time. Hashing is deliberately slow; callers on an
/// async runtime must run it on the blocking pool.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with an explicit bcrypt cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password
    pub fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// The plaintext is compared against the stored hash directly; it is
    /// never re-hashed with a fresh salt first.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(plaintext, stored_hash).map_err(|e| DomainError::Internal {
            message: format!("Password verification failed: {}", e),
        })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the test suite fast
    fn test_hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_verify_round_trip() {
        let hasher = test_hasher();
        let hash = hasher.hash("Passw0rd").unwrap();

        assert!(hasher.verify("Passw0rd", &hash).unwrap());
        assert!(!hasher.verify("passw0rd", &hash).unwrap());
        assert!(!hasher.verify("Passw0rd ", &hash).unwrap());
    }

    #[test]
    fn test_hash_embeds_fresh_salt() {
        let hasher = test_hasher();
        let first = hasher.hash("Passw0rd").unwrap();
        let second = hasher.hash("Passw0rd").unwrap();

        // Different salts, both still verify
        assert_ne!(first, second);
        assert!(hasher.verify("Passw0rd", &first).unwrap());
        assert!(hasher.verify("Passw0rd", &second).unwrap());
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hasher = test_hasher();
        let hash = hasher.hash("Sup3rSecret").unwrap();
        assert!(!hash.contains("Sup3rSecret"));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let hasher = test_hasher();
        assert!(hasher.verify("Passw0rd", "not-a-bcrypt-hash").is_err());
    }
}
