//! User entity representing a registered account in the DialAuth system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Countries whose phone numbers the service accepts.
///
/// The set is closed; adding a country means extending the prefix rule
/// list in the phone module alongside this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    Uzbekistan,
    Russia,
    #[serde(rename = "USA")]
    Usa,
}

impl Country {
    /// Canonical display name, matching the stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Uzbekistan => "Uzbekistan",
            Country::Russia => "Russia",
            Country::Usa => "USA",
        }
    }

    /// Parse a stored column value back into the enum
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Uzbekistan" => Some(Country::Uzbekistan),
            "Russia" => Some(Country::Russia),
            "USA" => Some(Country::Usa),
            _ => None,
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Phone number in canonical form (`+<country-code><subscriber>`), globally unique
    pub phone_number: String,

    /// Country the phone number belongs to
    pub country: Country,

    /// Password hash; never the plaintext, never serialized outward
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Whether the user's phone number has been verified
    pub is_verified: bool,

    /// Whether the account is active; inactive users cannot log in
    pub is_active: bool,

    /// Whether the user has staff privileges
    pub is_staff: bool,

    /// Whether the user has superuser privileges
    pub is_superuser: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new regular user
    pub fn new(phone_number: String, country: Country, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone_number,
            country,
            password_hash,
            is_verified: false,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Creates a new superuser with staff and superuser flags set
    pub fn new_superuser(phone_number: String, country: Country, password_hash: String) -> Self {
        let mut user = Self::new(phone_number, country, password_hash);
        user.is_staff = true;
        user.is_superuser = true;
        user
    }

    /// Marks the user's phone number as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Deactivates the account, blocking further logins
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Reactivates a previously deactivated account
    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Changes the user's country
    pub fn set_country(&mut self, country: Country) {
        self.country = country;
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}
