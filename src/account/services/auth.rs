//! Registration, login and user lookup.

use crate::account::{
    domain::{AccessToken, AccountDomainError, Email, Password, User, UserId, UserName},
    ports::{
        CredentialError, PasswordHasher, TokenSigner, UserRepository, UserRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    password: String,
}

impl RegisterUserRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] AccountDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Password hasher or token signer failed.
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    /// The email is already registered.
    #[error("email already exists: {0}")]
    EmailAlreadyExists(Email),
    /// Unknown email or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// No user has the given identifier.
    #[error("user {0} not found")]
    NotFound(UserId),
}

/// Coarse classification of [`AccountError`] for outer layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountErrorKind {
    /// Malformed input.
    Validation,
    /// The email is taken.
    Conflict,
    /// Authentication failed.
    Unauthorized,
    /// The user does not exist.
    NotFound,
    /// Infrastructure failure.
    Internal,
}

impl AccountError {
    /// Returns the error's classification.
    #[must_use]
    pub const fn kind(&self) -> AccountErrorKind {
        match self {
            Self::Domain(_) => AccountErrorKind::Validation,
            Self::EmailAlreadyExists(_)
            | Self::Repository(UserRepositoryError::DuplicateEmail(_)) => {
                AccountErrorKind::Conflict
            }
            Self::InvalidCredentials => AccountErrorKind::Unauthorized,
            Self::NotFound(_) => AccountErrorKind::NotFound,
            Self::Repository(_) | Self::Credentials(_) => AccountErrorKind::Internal,
        }
    }
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

/// Account orchestration service.
#[derive(Clone)]
pub struct AccountService<R, H, S, C>
where
    R: UserRepository,
    H: PasswordHasher,
    S: TokenSigner,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    signer: Arc<S>,
    clock: Arc<C>,
}

impl<R, H, S, C> AccountService<R, H, S, C>
where
    R: UserRepository,
    H: PasswordHasher,
    S: TokenSigner,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, hasher: Arc<H>, signer: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hasher,
            signer,
            clock,
        }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Domain`] for invalid input,
    /// [`AccountError::EmailAlreadyExists`] when the email is taken, or
    /// hasher and persistence errors.
    pub async fn register(&self, request: RegisterUserRequest) -> AccountResult<User> {
        let name = UserName::new(request.name)?;
        let email = Email::new(request.email)?;
        let password = Password::new(request.password)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            tracing::warn!(email = %email, "registration rejected: email already exists");
            return Err(AccountError::EmailAlreadyExists(email));
        }

        let digest = self.hasher.hash(&password)?;
        let user = User::new(name, email, digest, &*self.clock);
        self.repository.store(&user).await.map_err(|err| match err {
            UserRepositoryError::DuplicateEmail(taken) => AccountError::EmailAlreadyExists(taken),
            other => AccountError::Repository(other),
        })?;
        tracing::info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    /// Authenticates by email and password and returns a signed token.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] on authentication
    /// failure, or hasher, signer and persistence errors.
    pub async fn login(&self, email: &str, password: &str) -> AccountResult<AccessToken> {
        let Ok(login_email) = Email::new(email) else {
            return Err(AccountError::InvalidCredentials);
        };
        let Some(user) = self.repository.find_by_email(&login_email).await? else {
            tracing::debug!("login rejected: unknown email");
            return Err(AccountError::InvalidCredentials);
        };
        if !self.hasher.verify(password, user.password_digest())? {
            tracing::debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.signer.sign(&user.access_claims())?;
        tracing::info!(user_id = %user.id(), "user logged in");
        Ok(token)
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] when no user has the ID, or
    /// persistence errors.
    pub async fn find_by_id(&self, id: UserId) -> AccountResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    /// Retrieves a user by email address.
    ///
    /// Returns `Ok(None)` when nobody registered the address.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Domain`] for a malformed address, or
    /// persistence errors.
    pub async fn find_by_email(&self, email: &str) -> AccountResult<Option<User>> {
        let lookup = Email::new(email)?;
        Ok(self.repository.find_by_email(&lookup).await?)
    }
}
