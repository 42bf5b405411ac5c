//! # estately-database
//!
//! PostgreSQL access layer: connection pool management, embedded
//! migrations, and per-entity repositories. Repositories return
//! `AppResult` and never leak `sqlx::Error` past this crate.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use migration::run_migrations;
pub use repositories::{ListingRepository, ListingStore, UserRepository, UserStore};
