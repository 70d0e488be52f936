//! Phone number normalization and country derivation.
//!
//! The service accepts a fixed set of countries; each has a single full
//! pattern over the canonical form. Extending the set means adding one
//! pattern and one prefix rule here plus a `Country` variant.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::user::Country;
use crate::errors::{AuthError, DomainError};

/// Uzbekistan: +998 followed by exactly 9 digits
static UZBEKISTAN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+998\d{9}$").unwrap());

/// Russia: +7 followed by exactly 10 digits
static RUSSIA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+7\d{10}$").unwrap());

/// USA: +1 followed by exactly 10 digits
static USA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+1\d{10}$").unwrap());

/// Prefix rules ordered longest-prefix-first so a future shorter prefix
/// can never shadow a longer one.
const COUNTRY_PREFIXES: &[(&str, Country)] = &[
    ("+998", Country::Uzbekistan),
    ("+7", Country::Russia),
    ("+1", Country::Usa),
];

fn matches_supported_pattern(phone: &str) -> bool {
    UZBEKISTAN_REGEX.is_match(phone) || RUSSIA_REGEX.is_match(phone) || USA_REGEX.is_match(phone)
}

/// Normalize a raw phone number into canonical form.
///
/// Strips spaces and hyphens, prepends `+` when absent, then requires the
/// result to match one of the supported country patterns. Cleaning is
/// idempotent: an already-canonical number comes back unchanged.
pub fn normalize_phone(raw: &str) -> Result<String, DomainError> {
    let mut cleaned: String = raw
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    if !cleaned.starts_with('+') {
        cleaned.insert(0, '+');
    }

    if matches_supported_pattern(&cleaned) {
        Ok(cleaned)
    } else {
        Err(DomainError::Auth(AuthError::InvalidPhoneFormat {
            phone: mask_phone(raw),
        }))
    }
}

/// Derive the owning country from a canonical phone number.
///
/// Pure longest-prefix-first lookup; returns `None` for unknown prefixes.
pub fn derive_country(canonical: &str) -> Option<Country> {
    COUNTRY_PREFIXES
        .iter()
        .find(|(prefix, _)| canonical.starts_with(prefix))
        .map(|(_, country)| *country)
}

/// Mask a phone number for logging (show only the last 4 digits)
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{}", tail)
}
