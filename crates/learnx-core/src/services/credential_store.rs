//! Credential store: account registration and lookup over a `UserRepository`

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use learnx_security::PasswordService;

use crate::domain::{Registration, User, UserProfile};
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct CredentialStore<R: UserRepository + ?Sized = dyn UserRepository> {
    user_repo: Arc<R>,
}

impl<R: UserRepository + ?Sized> Clone for CredentialStore<R> {
    fn clone(&self) -> Self {
        Self {
            user_repo: Arc::clone(&self.user_repo),
        }
    }
}

impl<R: UserRepository + ?Sized> CredentialStore<R> {
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    /// Validate, check uniqueness, hash and persist a new account.
    ///
    /// When both the username and the email are taken the username wins.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Uuid, DomainError> {
        let registration = Registration::new(username, email, password)?;

        if self
            .user_repo
            .find_by_username(&registration.username)
            .await?
            .is_some()
        {
            warn!("Registration rejected: username taken: {}", registration.username);
            return Err(DomainError::DuplicateUsername(registration.username));
        }

        if self
            .user_repo
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            warn!("Registration rejected: email taken: {}", registration.email);
            return Err(DomainError::DuplicateEmail(registration.email));
        }

        let Registration {
            username,
            email,
            password,
        } = registration;
        let password_hash = hash_password(password).await?;

        // The store's unique constraints still decide a concurrent race.
        let created = self
            .user_repo
            .create(&User::new(username, email, password_hash))
            .await?;

        info!("Account registered: {} ({})", created.username, created.id);
        Ok(created.id)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.user_repo.find_by_username(username.trim()).await
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.user_repo.find_by_id(id).await?.map(|user| user.profile()))
    }
}

async fn hash_password(password: String) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || PasswordService::hash(&password))
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?
        .map_err(|e| DomainError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;

    fn existing(username: &str, email: &str) -> User {
        User::new(username.into(), email.into(), "hash".into())
    }

    #[tokio::test]
    async fn test_register_hashes_and_persists() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .withf(|user: &User| {
                user.username == "alice"
                    && user.email == "alice@x.com"
                    && user.password_hash.starts_with("$argon2")
                    && !user.password_hash.contains("Passw0rd!")
            })
            .returning(|user| Ok(user.clone()));

        let store = CredentialStore::new(Arc::new(repo));
        let id = store.register("alice", "Alice@x.com", "Passw0rd!").await.unwrap();

        assert!(!id.is_nil());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(existing(name, "other@x.com"))));
        repo.expect_find_by_email().times(0);
        repo.expect_create().times(0);

        let store = CredentialStore::new(Arc::new(repo));
        let result = store.register("alice", "alice@x.com", "Passw0rd!").await;

        assert!(matches!(result, Err(DomainError::DuplicateUsername(name)) if name == "alice"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(existing("bob", email))));
        repo.expect_create().times(0);

        let store = CredentialStore::new(Arc::new(repo));
        let result = store.register("alice", "alice@x.com", "Passw0rd!").await;

        assert!(matches!(result, Err(DomainError::DuplicateEmail(email)) if email == "alice@x.com"));
    }

    #[tokio::test]
    async fn test_register_lost_race_surfaces_constraint_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|user| Err(DomainError::DuplicateEmail(user.email.clone())));

        let store = CredentialStore::new(Arc::new(repo));
        let result = store.register("alice", "alice@x.com", "Passw0rd!").await;

        assert!(matches!(result, Err(DomainError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_register_invalid_input_never_touches_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().times(0);
        repo.expect_find_by_email().times(0);
        repo.expect_create().times(0);

        let store = CredentialStore::new(Arc::new(repo));
        let result = store.register("alice", "alice@x.com", "weak").await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_store_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Err(DomainError::StoreUnavailable("connection refused".into())));

        let store = CredentialStore::new(Arc::new(repo));
        let result = store.register("alice", "alice@x.com", "Passw0rd!").await;

        assert!(matches!(result, Err(DomainError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_find_by_id_returns_profile() {
        let user = existing("alice", "alice@x.com");
        let id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .withf(move |lookup| *lookup == id)
            .returning(move |_| Ok(Some(user.clone())));

        let store = CredentialStore::new(Arc::new(repo));
        let profile = store.find_by_id(&id).await.unwrap().unwrap();

        assert_eq!(profile.username, "alice");
        assert_eq!(profile.email, "alice@x.com");
    }
}
