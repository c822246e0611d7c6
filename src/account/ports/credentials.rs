//! Ports for the password hashing and token signing collaborators.
//!
//! Both are opaque to this crate: implementations typically wrap bcrypt or
//! argon2 and a JWT library.

use crate::account::domain::{AccessClaims, AccessToken, Password, PasswordDigest};
use thiserror::Error;

/// Failure reported by a credential collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("credential backend failure: {0}")]
pub struct CredentialError(pub String);

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Produces a digest for the plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when the backend fails.
    fn hash(&self, password: &Password) -> Result<PasswordDigest, CredentialError>;

    /// Checks a plaintext candidate against a stored digest.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when the backend fails; a mismatch is
    /// `Ok(false)`.
    fn verify(&self, candidate: &str, digest: &PasswordDigest) -> Result<bool, CredentialError>;
}

/// Access-token issuance.
pub trait TokenSigner: Send + Sync {
    /// Signs the claims into a token.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when signing fails.
    fn sign(&self, claims: &AccessClaims) -> Result<AccessToken, CredentialError>;
}
