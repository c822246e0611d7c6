//! Application services for user accounts.

mod auth;

pub use auth::{AccountError, AccountErrorKind, AccountResult, AccountService, RegisterUserRequest};
