//! # LearnX Security
//!
//! Password hashing and session token signing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, JwtError, JwtService};
pub use password::{PasswordError, PasswordService};
