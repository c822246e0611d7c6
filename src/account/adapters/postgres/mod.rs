//! `PostgreSQL` adapters for user accounts.

mod models;
mod repository;
mod schema;

pub use crate::config::PgPool;
pub use repository::PostgresUserRepository;
