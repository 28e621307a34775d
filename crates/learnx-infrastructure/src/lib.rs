//! # LearnX Infrastructure
//!
//! Credential store adapters: PostgreSQL for deployments, an in-memory map
//! for tests and local runs.

pub mod database;

pub use database::{create_pool, run_migrations, InMemoryUserRepository, PgUserRepository};
