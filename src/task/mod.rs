//! Owner-scoped task tracking.
//!
//! Each task belongs to exactly one owner, moves forward through the
//! `open -> in_progress -> done` lifecycle, and holds a duplicate-free set of
//! labels. Reads go through an owner-scoped query with optional status,
//! search and label predicates, a single sort key and a pagination window.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
