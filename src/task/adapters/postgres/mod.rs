//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub use crate::config::PgPool;
pub use repository::PostgresTaskRepository;
