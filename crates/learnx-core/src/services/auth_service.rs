//! Authentication service: sign-up, sign-in, and session token checks

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use learnx_security::{JwtError, JwtService, PasswordService};

use crate::domain::{User, UserProfile};
use crate::error::DomainError;
use crate::repositories::UserRepository;
use crate::services::CredentialStore;

/// Result of a successful sign-up or sign-in
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub subject: Uuid,
    /// Unix seconds
    pub expires_at: i64,
}

pub struct AuthService<R: UserRepository + ?Sized = dyn UserRepository> {
    store: CredentialStore<R>,
    jwt: JwtService,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(user_repo: Arc<R>, jwt: JwtService) -> Self {
        Self {
            store: CredentialStore::new(user_repo),
            jwt,
        }
    }

    pub fn credential_store(&self) -> &CredentialStore<R> {
        &self.store
    }

    /// Register a new account and open a session for it
    pub async fn sign_up(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionToken, DomainError> {
        info!("Sign-up attempt for username: {}", username.trim());

        let user_id = self.store.register(username, email, password).await?;
        self.issue(user_id)
    }

    /// Check credentials and open a session
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<SessionToken, DomainError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        info!("Sign-in attempt for username: {}", username);

        let user = self.store.find_by_username(username).await?;
        let user = match verify_password(user, password).await? {
            Some(user) => user,
            None => {
                warn!("Sign-in failed for username: {}", username);
                return Err(DomainError::InvalidCredentials);
            }
        };

        info!("Sign-in successful for: {}", user.username);
        self.issue(user.id)
    }

    /// Resolve a presented bearer token to its subject
    pub fn verify(&self, token: Option<&str>) -> Result<Uuid, DomainError> {
        let token = match token.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(DomainError::MissingToken),
        };

        self.jwt.validate_access_token(token).map_err(|e| {
            match e {
                JwtError::TokenExpired => debug!("Rejected expired token"),
                other => debug!("Rejected token: {}", other),
            }
            DomainError::InvalidToken
        })
    }

    pub async fn current_user(&self, subject: &Uuid) -> Result<UserProfile, DomainError> {
        self.store
            .find_by_id(subject)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    fn issue(&self, user_id: Uuid) -> Result<SessionToken, DomainError> {
        let issued = self.jwt.generate_access_token(&user_id).map_err(|e| {
            error!("Token generation failed: {}", e);
            DomainError::Internal(e.to_string())
        })?;

        Ok(SessionToken {
            token: issued.token,
            subject: user_id,
            expires_at: issued.expires_at,
        })
    }
}

/// Returns the user only when the password matches. A missing user still
/// pays for one Argon2 verification.
async fn verify_password(user: Option<User>, password: &str) -> Result<Option<User>, DomainError> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || match user {
        Some(user) => match PasswordService::verify(&password, &user.password_hash) {
            Ok(true) => Some(user),
            Ok(false) => None,
            Err(e) => {
                error!("Stored hash for {} is unreadable: {}", user.id, e);
                None
            }
        },
        None => {
            PasswordService::verify_dummy(&password);
            None
        }
    })
    .await
    .map_err(|e| DomainError::Internal(e.to_string()))
}
