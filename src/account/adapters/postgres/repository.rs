//! `PostgreSQL` repository implementation for user storage.

use super::{models::UserRow, schema::users};
use crate::account::{
    domain::{Email, PasswordDigest, PersistedUserData, Role, User, UserId, UserName},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use crate::config::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let row = to_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(&lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_users_email_unique")
}

fn to_row(user: &User) -> UserRow {
    UserRow {
        id: user.id().into_inner(),
        name: user.name().as_str().to_owned(),
        email: user.email().as_str().to_owned(),
        password_digest: user.password_digest().as_str().to_owned(),
        roles: user
            .roles()
            .iter()
            .map(|role| role.as_str().to_owned())
            .collect(),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        name: persisted_name,
        email: persisted_email,
        password_digest,
        roles: persisted_roles,
        created_at,
        updated_at,
    } = row;

    let roles = persisted_roles
        .iter()
        .map(|role| Role::try_from(role.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(UserRepositoryError::persistence)?;

    let data = PersistedUserData {
        id: UserId::from_uuid(id),
        name: UserName::new(persisted_name).map_err(UserRepositoryError::persistence)?,
        email: Email::new(persisted_email).map_err(UserRepositoryError::persistence)?,
        password_digest: PasswordDigest::new(password_digest),
        roles,
        created_at,
        updated_at,
    };
    Ok(User::from_persisted(data))
}
