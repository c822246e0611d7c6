//! User accounts: registration, credential login and lookup.
//!
//! Password hashing and token signing are external collaborators reached
//! through [`ports::PasswordHasher`] and [`ports::TokenSigner`]. A
//! [`domain::UserId`] converts into the [`crate::task::domain::OwnerId`]
//! that scopes task operations.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
