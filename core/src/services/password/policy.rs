//! Pluggable password strength policy.

use crate::errors::AuthError;

/// A single password rule with a tagged failure reason
#[derive(Debug, Clone, Copy)]
pub struct PasswordRule {
    /// Stable code identifying the rule (e.g. `min_length`)
    pub code: &'static str,
    /// Human-readable reason returned when the rule rejects
    pub message: &'static str,
    predicate: fn(&str) -> bool,
}

impl PasswordRule {
    /// Create a new rule
    pub fn new(code: &'static str, message: &'static str, predicate: fn(&str) -> bool) -> Self {
        Self {
            code,
            message,
            predicate,
        }
    }

    /// Run the rule against a candidate password
    pub fn check(&self, password: &str) -> bool {
        (self.predicate)(password)
    }
}

/// Ordered list of password rules, evaluated in sequence and
/// short-circuiting on the first failure.
///
/// The policy lives outside the hasher so deployments can tighten or relax
/// requirements without touching the hashing code.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    rules: Vec<PasswordRule>,
}

impl PasswordPolicy {
    /// Create an empty policy (accepts anything)
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule to the end of the evaluation order
    pub fn with_rule(mut self, rule: PasswordRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validate a candidate password, returning the first violated rule
    /// as `AuthError::WeakPassword`.
    pub fn validate(&self, password: &str) -> Result<(), AuthError> {
        for rule in &self.rules {
            if !rule.check(password) {
                return Err(AuthError::WeakPassword {
                    reason: rule.message.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for PasswordPolicy {
    /// The default policy: at least 8 characters, at least one uppercase letter.
    fn default() -> Self {
        Self::empty()
            .with_rule(PasswordRule::new(
                "min_length",
                "Password must be at least 8 characters long.",
                |p| p.chars().count() >= 8,
            ))
            .with_rule(PasswordRule::new(
                "uppercase",
                "Password must contain at least one uppercase letter.",
                |p| p.chars().any(|c| c.is_uppercase()),
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_accepts_strong_password() {
        let policy = PasswordPolicy::default();
        assert!(policy.validate("Passw0rd").is_ok());
    }

    #[test]
    fn test_too_short_rejected_first() {
        let policy = PasswordPolicy::default();
        let err = policy.validate("Short").unwrap_err();
        match err {
            AuthError::WeakPassword { reason } => {
                assert!(reason.contains("8 characters"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_uppercase_rejected() {
        let policy = PasswordPolicy::default();
        let err = policy.validate("lowercase1").unwrap_err();
        match err {
            AuthError::WeakPassword { reason } => {
                assert!(reason.contains("uppercase"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rules_short_circuit_in_order() {
        // A password violating both rules reports only the first one
        let policy = PasswordPolicy::default();
        let err = policy.validate("tiny").unwrap_err();
        match err {
            AuthError::WeakPassword { reason } => {
                assert!(reason.contains("8 characters"));
                assert!(!reason.contains("uppercase"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_custom_rule_extension() {
        let policy = PasswordPolicy::default().with_rule(PasswordRule::new(
            "digit",
            "Password must contain at least one digit.",
            |p| p.chars().any(|c| c.is_ascii_digit()),
        ));

        assert!(policy.validate("Password").is_err());
        assert!(policy.validate("Passw0rd").is_ok());
    }

    #[test]
    fn test_empty_policy_accepts_anything() {
        let policy = PasswordPolicy::empty();
        assert!(policy.validate("").is_ok());
    }
}
