//! # LearnX Shared
//!
//! Configuration, telemetry, and constants shared by the LearnX auth crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;

pub use config::AppConfig;
pub use error::AppError;
