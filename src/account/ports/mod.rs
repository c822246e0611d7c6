//! Port contracts for user accounts.

pub mod credentials;
pub mod repository;

pub use credentials::{CredentialError, PasswordHasher, TokenSigner};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
