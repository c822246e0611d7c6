//! Taskmill: owner-scoped task tracking core.
//!
//! This crate provides the query and lifecycle engine of a multi-user task
//! tracker: owner-scoped filtered and paginated task queries, a forward-only
//! status lifecycle, and duplicate-free label sets, plus the account
//! registration and login flow that yields the acting owner.
//!
//! # Architecture
//!
//! Taskmill follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task queries, status lifecycle and label management
//! - [`account`]: User registration, login and lookup
//! - [`config`]: Database configuration and connection pooling

pub mod account;
pub mod config;
pub mod task;
