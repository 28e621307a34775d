//! User domain entity

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::DomainError;

static USERNAME_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid username regex"));

static PASSWORD_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9!@#$]+$").expect("valid password regex"));

/// Registered account. The hash never leaves the process through serde.
#[derive(Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Fields safe to hand back to the account owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
}

/// Sign-up input after normalisation, checked before anything is hashed.
#[derive(Clone, Validate)]
pub struct Registration {
    #[validate(
        length(min = 3, max = 30, message = "Username must be 3-30 characters long."),
        custom(function = "validate_username_charset")
    )]
    pub username: String,

    #[validate(
        email(message = "Email address is invalid."),
        length(max = 254, message = "Email address is too long.")
    )]
    pub email: String,

    #[validate(
        length(min = 8, max = 15, message = "Password must be 8-15 characters long."),
        custom(function = "validate_password_rules")
    )]
    pub password: String,
}

impl Registration {
    /// Trims the username and email, lower-cases the email, then validates.
    pub fn new(username: &str, email: &str, password: &str) -> Result<Self, DomainError> {
        let registration = Self {
            username: username.trim().to_string(),
            email: email.trim().to_lowercase(),
            password: password.to_string(),
        };

        registration
            .validate()
            .map_err(|e| DomainError::Validation(first_message(&e)))?;
        Ok(registration)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn validate_username_charset(username: &str) -> Result<(), ValidationError> {
    if USERNAME_CHARSET.is_match(username) {
        return Ok(());
    }
    Err(ValidationError::new("username_charset").with_message(
        "Only letters, numbers, underscores (_), and hyphens (-) are allowed.".into(),
    ))
}

fn validate_password_rules(password: &str) -> Result<(), ValidationError> {
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::new("password_uppercase")
            .with_message("Password must contain at least one capital letter.".into()));
    }
    if !PASSWORD_CHARSET.is_match(password) {
        return Err(ValidationError::new("password_charset")
            .with_message("Only !@#$ are allowed as special characters.".into()));
    }
    Ok(())
}

/// Pick one human-readable message, in form order.
fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    for field in ["username", "email", "password"] {
        if let Some(error) = fields.get(field).and_then(|errs| errs.first()) {
            return error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {}", field));
        }
    }
    "Invalid input".to_string()
}
