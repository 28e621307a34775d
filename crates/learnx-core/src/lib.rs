//! # LearnX Core
//!
//! Domain entities, the user repository port, and the credential and
//! session services built on top of it.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use error::DomainError;
pub use repositories::UserRepository;
pub use services::{AuthService, CredentialStore, SessionToken};
