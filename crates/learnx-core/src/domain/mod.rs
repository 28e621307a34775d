//! # LearnX Core - Domain Module

pub mod user;

pub use user::{Registration, User, UserProfile};
