//! Domain services (business logic)

pub mod auth_service;
pub mod credential_store;

pub use auth_service::{AuthService, SessionToken};
pub use credential_store::CredentialStore;
