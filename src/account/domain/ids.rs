//! Identifier and validated scalar types for the account domain.

use super::{AccountDomainError, PasswordRule};
use crate::task::domain::OwnerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for OwnerId {
    fn from(id: UserId) -> Self {
        Self::from_uuid(id.into_inner())
    }
}

/// Email address used as the login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum address length in characters, matching the `email` column.
    pub const MAX_LENGTH: usize = 255;

    /// Creates a validated email address. Surrounding whitespace is removed.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::InvalidEmail`] unless the value has a
    /// non-empty local part, a single `@`, a dotted domain, and at most
    /// [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let is_valid = normalized.chars().count() <= Self::MAX_LENGTH
            && normalized.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }) && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(AccountDomainError::InvalidEmail(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name, non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Maximum name length in characters, matching the `name` column.
    pub const MAX_LENGTH: usize = 255;

    /// Creates a validated display name.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptyName`] when the value is blank and
    /// [`AccountDomainError::NameTooLong`] above [`Self::MAX_LENGTH`]
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AccountDomainError::EmptyName);
        }
        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(AccountDomainError::NameTooLong {
                length,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password that passed the strength rules.
///
/// Only ever handed to a password hasher; never stored or printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Minimum accepted length in characters.
    pub const MIN_LENGTH: usize = 6;

    /// Validates a plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::WeakPassword`] naming the first rule the
    /// value breaks.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let plaintext = value.into();
        let rules: [(PasswordRule, bool); 4] = [
            (
                PasswordRule::MinimumLength,
                plaintext.chars().count() >= Self::MIN_LENGTH,
            ),
            (
                PasswordRule::Uppercase,
                plaintext.chars().any(|ch| ch.is_ascii_uppercase()),
            ),
            (
                PasswordRule::Digit,
                plaintext.chars().any(|ch| ch.is_ascii_digit()),
            ),
            (
                PasswordRule::SpecialCharacter,
                plaintext
                    .chars()
                    .any(|ch| !ch.is_alphanumeric() && !ch.is_whitespace()),
            ),
        ];
        if let Some((rule, _)) = rules.iter().find(|(_, satisfied)| !satisfied) {
            return Err(AccountDomainError::WeakPassword(*rule));
        }
        Ok(Self(plaintext))
    }

    /// Exposes the plaintext to a hasher.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}
