//! Database module (repository adapters)

pub mod connection;
pub mod memory;
pub mod postgres;

pub use connection::{create_pool, run_migrations};
pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
