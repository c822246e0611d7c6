//! Error types for account domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing account domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountDomainError {
    /// The display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// The display name is longer than the stored column allows.
    #[error("user name is {length} characters long, expected at most {max}")]
    NameTooLong {
        /// Length of the rejected name in characters.
        length: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// The email address is not of the form `local@domain.tld`.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The password does not satisfy a strength rule.
    #[error("password must {0}")]
    WeakPassword(PasswordRule),
}

/// A password strength rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    /// At least [`super::Password::MIN_LENGTH`] characters.
    MinimumLength,
    /// At least one ASCII uppercase letter.
    Uppercase,
    /// At least one ASCII digit.
    Digit,
    /// At least one character that is neither alphanumeric nor whitespace.
    SpecialCharacter,
}

impl std::fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::MinimumLength => "be at least 6 characters long",
            Self::Uppercase => "contain at least 1 uppercase letter",
            Self::Digit => "contain at least 1 number",
            Self::SpecialCharacter => "contain at least 1 special character",
        };
        f.write_str(text)
    }
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
