use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::DateTime;
use chrono::Utc;
use regex::Regex;
use uuid::Uuid;

use crate::domain::account::errors::AccountIdError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::NameError;
use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::errors::PhoneError;
use crate::domain::query::FieldKind;
use crate::domain::query::ListPolicy;

/// Whitelist for account listings. The password hash is never filterable.
pub const ACCOUNT_LIST_POLICY: ListPolicy = ListPolicy {
    fields: &[
        ("name", FieldKind::String),
        ("email", FieldKind::String),
        ("phone", FieldKind::String),
    ],
    sortable: &["name", "email", "createdAt"],
    default_sort: "name",
    default_limit: 20,
    max_limit: 100,
};

/// Account aggregate entity.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: DisplayName,
    pub email: EmailAddress,
    /// Write-only; set once at creation.
    pub password_hash: String,
    pub phone: Option<PhoneNumber>,
    pub created_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Trimmed, 2-50 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 50;

    /// # Errors
    /// * `TooShort` - Fewer than 2 characters after trimming
    /// * `TooLong` - More than 50 characters after trimming
    pub fn new(name: &str) -> Result<Self, NameError> {
        let name = name.trim();
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(NameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// RFC 5322 syntax, and the domain must end in an alphabetic TLD of at
/// least two letters (`a@b` is rejected even though RFC 5322 allows it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    /// * `MissingTopLevelDomain` - Domain has no dotted alphabetic TLD
    pub fn new(email: &str) -> Result<Self, EmailError> {
        let email = email.trim();
        email_address::EmailAddress::from_str(email)
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))?;

        let tld = email
            .rsplit_once('@')
            .and_then(|(_, domain)| domain.rsplit_once('.'))
            .map(|(_, tld)| tld);
        match tld {
            Some(tld) if tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()) => {
                Ok(Self(email.to_string()))
            }
            _ => Err(EmailError::MissingTopLevelDomain(email.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

const PHONE_REGEX: &str = r"^(\+40|0040|0)[67]\d{8}$";

// Constant pattern, forced by `test_phone_pattern_compiles`.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_REGEX).expect("phone pattern must compile"));

/// Romanian mobile or landline number, stored without separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize and validate a phone number.
    ///
    /// Spaces, dashes and parentheses are stripped first, so
    /// `0722 123-456` and `(0722)123456` both normalize to `0722123456`.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not `+40`/`0040`/`0` followed by 6 or 7 and eight digits
    pub fn new(phone: &str) -> Result<Self, PhoneError> {
        let normalized: String = phone
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();

        if PHONE_PATTERN.is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(PhoneError::InvalidFormat(
                "use +40xxxxxxxxx or 07xxxxxxxx".to_string(),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the length policy.
///
/// Never printed: `Debug` is redacted.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    pub fn new(password: &str) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self(password.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Fields with an application-level uniqueness rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    Phone,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::Email => "email",
            UniqueField::Phone => "phone",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to create a new account with validated fields
#[derive(Debug, Clone)]
pub struct CreateAccountCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: Password,
    pub phone: Option<PhoneNumber>,
}

impl CreateAccountCommand {
    pub fn new(
        name: DisplayName,
        email: EmailAddress,
        password: Password,
        phone: Option<PhoneNumber>,
    ) -> Self {
        Self {
            name,
            email,
            password,
            phone,
        }
    }
}

/// Partial update of an account.
///
/// Only provided fields are written. The password hash is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPatch {
    pub name: Option<DisplayName>,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}
