//! User aggregate, roles and access-token claims.

use super::{Email, ParseRoleError, UserId, UserName};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Authorization role carried in access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular account.
    User,
    /// Administrative account.
    Admin,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Opaque digest produced by a password hasher.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wraps a digest string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the digest as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// Registered user.
///
/// Serialization omits the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: UserName,
    email: Email,
    #[serde(skip)]
    password_digest: PasswordDigest,
    roles: Vec<Role>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted identifier.
    pub id: UserId,
    /// Persisted display name.
    pub name: UserName,
    /// Persisted email address.
    pub email: Email,
    /// Persisted password digest.
    pub password_digest: PasswordDigest,
    /// Persisted roles.
    pub roles: Vec<Role>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the [`Role::User`] role.
    #[must_use]
    pub fn new(
        name: UserName,
        email: Email,
        password_digest: PasswordDigest,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserId::new(),
            name,
            email,
            password_digest,
            roles: vec![Role::User],
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            password_digest: data.password_digest,
            roles: data.roles,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the stored password digest.
    #[must_use]
    pub const fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    /// Returns the granted roles.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the claims embedded in this user's access token.
    #[must_use]
    pub fn access_claims(&self) -> AccessClaims {
        AccessClaims {
            sub: self.id,
            name: self.name.as_str().to_owned(),
            roles: self.roles.clone(),
        }
    }
}

/// Claims handed to the token signer on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the authenticated user.
    pub sub: UserId,
    /// Display name.
    pub name: String,
    /// Granted roles.
    pub roles: Vec<Role>,
}

/// Signed token returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a signed token string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
