//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Username already exists")]
    DuplicateUsername(String),

    #[error("Email already exists")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No token provided")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Stable machine-readable code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::DuplicateUsername(_) => "DUPLICATE_USERNAME",
            DomainError::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            DomainError::InvalidCredentials => "INVALID_CREDENTIALS",
            DomainError::MissingToken => "MISSING_TOKEN",
            DomainError::InvalidToken => "INVALID_TOKEN",
            DomainError::UserNotFound => "USER_NOT_FOUND",
            DomainError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            DomainError::Validation(_) => "VALIDATION_ERROR",
            DomainError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for infrastructure faults the client cannot correct.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            DomainError::StoreUnavailable(_) | DomainError::Internal(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_messages_name_the_field() {
        let username = DomainError::DuplicateUsername("alice".into()).to_string();
        let email = DomainError::DuplicateEmail("alice@x.com".into()).to_string();

        assert!(username.contains("Username"));
        assert!(email.contains("Email"));
    }

    #[test]
    fn test_only_infrastructure_errors_are_server_faults() {
        assert!(DomainError::StoreUnavailable("down".into()).is_server_fault());
        assert!(DomainError::Internal("boom".into()).is_server_fault());

        assert!(!DomainError::DuplicateUsername("a".into()).is_server_fault());
        assert!(!DomainError::InvalidCredentials.is_server_fault());
        assert!(!DomainError::MissingToken.is_server_fault());
        assert!(!DomainError::InvalidToken.is_server_fault());
        assert!(!DomainError::UserNotFound.is_server_fault());
        assert!(!DomainError::Validation("bad".into()).is_server_fault());
    }
}
