//! Database configuration and connection pooling.
//!
//! Settings come from the process environment:
//!
//! - `TASKMILL_DATABASE_URL` (required): `PostgreSQL` connection URL
//! - `TASKMILL_DB_POOL_SIZE` (optional): maximum pooled connections,
//!   default [`DatabaseConfig::DEFAULT_POOL_SIZE`]

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Environment variable holding the database URL.
pub const DATABASE_URL_VAR: &str = "TASKMILL_DATABASE_URL";

/// Environment variable holding the pool size.
pub const POOL_SIZE_VAR: &str = "TASKMILL_DB_POOL_SIZE";

/// Connection pool shared by the `PostgreSQL` adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required environment variable {0}")]
    MissingVariable(&'static str),

    /// The pool size is not a positive integer.
    #[error("invalid pool size '{0}', expected a positive integer")]
    InvalidPoolSize(String),

    /// The pool could not be created.
    #[error("failed to build connection pool: {0}")]
    Pool(Arc<dyn std::error::Error + Send + Sync>),
}

/// Database connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    url: String,
    pool_size: u32,
}

impl DatabaseConfig {
    /// Pool size used when none is configured.
    pub const DEFAULT_POOL_SIZE: u32 = 8;

    /// Creates a configuration with the default pool size.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_size: Self::DEFAULT_POOL_SIZE,
        }
    }

    /// Overrides the pool size.
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is missing or the pool size is
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is missing or the pool size is
    /// malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVariable(DATABASE_URL_VAR))?;

        let pool_size = match lookup(POOL_SIZE_VAR) {
            None => Self::DEFAULT_POOL_SIZE,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::InvalidPoolSize(raw)),
            },
        };

        Ok(Self { url, pool_size })
    }

    /// Returns the database URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Builds a connection pool for the configured database.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the initial connections cannot be
    /// established.
    pub fn build_pool(&self) -> Result<PgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.url.as_str());
        let pool = Pool::builder()
            .max_size(self.pool_size)
            .build(manager)
            .map_err(|err| ConfigError::Pool(Arc::new(err)))?;
        tracing::info!(pool_size = self.pool_size, "database pool ready");
        Ok(pool)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("pool_size", &self.pool_size)
            .finish()
    }
}
