//! Domain model for user accounts.

mod error;
mod ids;
mod user;

pub use error::{AccountDomainError, ParseRoleError, PasswordRule};
pub use ids::{Email, Password, UserId, UserName};
pub use user::{AccessClaims, AccessToken, PasswordDigest, PersistedUserData, Role, User};
