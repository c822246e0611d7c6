//! In-memory integration tests for accounts driving the task service.

use std::sync::Arc;

use super::helpers::{TestService, seed, service};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;
use taskmill::account::{
    adapters::memory::InMemoryUserRepository,
    domain::{AccessClaims, AccessToken, Password, PasswordDigest},
    ports::{CredentialError, PasswordHasher, TokenSigner},
    services::{AccountErrorKind, AccountService, RegisterUserRequest},
};
use taskmill::task::domain::{OwnerId, Pagination, TaskFilter};

/// Reversible stand-in hasher for integration tests.
struct PrefixHasher;

impl PasswordHasher for PrefixHasher {
    fn hash(&self, password: &Password) -> Result<PasswordDigest, CredentialError> {
        Ok(PasswordDigest::new(format!("plain:{}", password.expose())))
    }

    fn verify(&self, candidate: &str, digest: &PasswordDigest) -> Result<bool, CredentialError> {
        Ok(digest.as_str().strip_prefix("plain:") == Some(candidate))
    }
}

/// Signer that renders the subject as the token.
struct SubjectSigner;

impl TokenSigner for SubjectSigner {
    fn sign(&self, claims: &AccessClaims) -> Result<AccessToken, CredentialError> {
        Ok(AccessToken::new(claims.sub.to_string()))
    }
}

type Accounts = AccountService<InMemoryUserRepository, PrefixHasher, SubjectSigner, DefaultClock>;

fn accounts() -> Accounts {
    AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(PrefixHasher),
        Arc::new(SubjectSigner),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_users_own_separate_task_lists(service: TestService) -> eyre::Result<()> {
    let accounts = accounts();
    let ada = accounts
        .register(RegisterUserRequest::new("Ada", "ada@example.com", "Engine1!"))
        .await?;
    let grace = accounts
        .register(RegisterUserRequest::new("Grace", "grace@example.com", "Cobol59!"))
        .await?;

    seed(&service, ada.id().into(), "Analytical notes", &[]).await?;
    seed(&service, grace.id().into(), "Compiler notes", &[]).await?;

    let ada_page = service
        .list(ada.id().into(), TaskFilter::new(), Pagination::default())
        .await?;
    ensure!(ada_page.total == 1);
    ensure!(
        ada_page
            .items
            .iter()
            .all(|task| task.owner_id() == OwnerId::from(ada.id()))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_returns_signed_subject() -> eyre::Result<()> {
    let accounts = accounts();
    let user = accounts
        .register(RegisterUserRequest::new("Ada", "ada@example.com", "Engine1!"))
        .await?;

    let token = accounts.login("ada@example.com", "Engine1!").await?;
    ensure!(token.as_str() == user.id().to_string());

    let rejected = accounts.login("ada@example.com", "engine1!").await;
    ensure!(
        rejected.as_ref().err().map(|err| err.kind()) == Some(AccountErrorKind::Unauthorized)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_registration_conflicts() -> eyre::Result<()> {
    let accounts = accounts();
    accounts
        .register(RegisterUserRequest::new("Ada", "ada@example.com", "Engine1!"))
        .await?;

    let again = accounts
        .register(RegisterUserRequest::new("Ada", " ada@example.com", "Engine2!"))
        .await;

    ensure!(again.as_ref().err().map(|err| err.kind()) == Some(AccountErrorKind::Conflict));
    Ok(())
}
