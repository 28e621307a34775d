//! In-memory user repository
//!
//! Same contract as the PostgreSQL adapter. Uniqueness is checked and the
//! record inserted under a single write lock, so racing registrations for the
//! same username or email resolve to exactly one winner.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use learnx_core::domain::User;
use learnx_core::error::DomainError;
use learnx_core::repositories::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts. Used by tests to assert nothing was written.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Test hook: drop an account behind the service's back so that a token
    /// outlives its subject.
    pub async fn remove(&self, id: &Uuid) -> Option<User> {
        self.users.write().await.remove(id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(DomainError::DuplicateUsername(user.username.clone()));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::DuplicateEmail(user.email.clone()));
        }

        users.insert(user.id, user.clone());
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use learnx_core::AuthService;
    use learnx_security::JwtService;

    fn service() -> (Arc<InMemoryUserRepository>, AuthService) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = AuthService::new(
            repo.clone() as Arc<dyn UserRepository>,
            JwtService::new("memory-test-secret", 3600),
        );
        (repo, service)
    }

    #[tokio::test]
    async fn test_create_enforces_uniqueness() {
        let repo = InMemoryUserRepository::new();
        let alice = User::new("alice".into(), "alice@x.com".into(), "h".into());

        repo.create(&alice).await.unwrap();

        let same_name = User::new("alice".into(), "other@x.com".into(), "h".into());
        let same_email = User::new("bob".into(), "alice@x.com".into(), "h".into());
        assert!(matches!(
            repo.create(&same_name).await,
            Err(DomainError::DuplicateUsername(_))
        ));
        assert!(matches!(
            repo.create(&same_email).await,
            Err(DomainError::DuplicateEmail(_))
        ));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookups() {
        let repo = InMemoryUserRepository::new();
        let alice = User::new("alice".into(), "alice@x.com".into(), "h".into());
        repo.create(&alice).await.unwrap();

        assert_eq!(repo.find_by_id(&alice.id).await.unwrap().unwrap().username, "alice");
        assert!(repo.find_by_username("alice").await.unwrap().is_some());
        assert!(repo.find_by_email("alice@x.com").await.unwrap().is_some());
        assert!(repo.find_by_username("bob").await.unwrap().is_none());
        assert!(repo.find_by_id(&Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_up_succeeds_exactly_once() {
        let (repo, service) = service();

        let first = service.sign_up("alice", "alice@x.com", "Passw0rd!").await;
        let second = service.sign_up("alice", "alice@x.com", "Passw0rd!").await;

        assert!(first.is_ok());
        assert!(matches!(
            second,
            Err(DomainError::DuplicateUsername(_)) | Err(DomainError::DuplicateEmail(_))
        ));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_with_new_username() {
        let (_, service) = service();
        service.sign_up("alice", "alice@x.com", "Passw0rd!").await.unwrap();

        let result = service.sign_up("bob", "ALICE@x.com", "Passw0rd!").await;
        assert!(matches!(result, Err(DomainError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_sign_in_subject_matches_registered_id() {
        let (repo, service) = service();
        let signed_up = service.sign_up("alice", "alice@x.com", "Passw0rd!").await.unwrap();

        let signed_in = service.sign_in("alice", "Passw0rd!").await.unwrap();
        let stored = repo.find_by_username("alice").await.unwrap().unwrap();

        assert_eq!(signed_in.subject, stored.id);
        assert_eq!(signed_up.subject, stored.id);
        assert_eq!(service.verify(Some(&signed_in.token)).unwrap(), stored.id);
        assert_ne!(stored.password_hash, "Passw0rd!");
    }

    #[tokio::test]
    async fn test_sign_in_wrong_passwords() {
        let (_, service) = service();
        service.sign_up("alice", "alice@x.com", "Passw0rd!").await.unwrap();

        for wrong in ["WrongPw", "passw0rd!", "Passw0rd", "Passw0rd!!", " Passw0rd!"] {
            assert!(
                matches!(
                    service.sign_in("alice", wrong).await,
                    Err(DomainError::InvalidCredentials)
                ),
                "password {:?} should be rejected",
                wrong
            );
        }
    }

    #[tokio::test]
    async fn test_current_user_round_trip() {
        let (_, service) = service();
        service.sign_up("alice", "alice@x.com", "Passw0rd!").await.unwrap();

        let session = service.sign_in("alice", "Passw0rd!").await.unwrap();
        let subject = service.verify(Some(&session.token)).unwrap();
        let profile = service.current_user(&subject).await.unwrap();

        assert_eq!(profile.username, "alice");
        assert_eq!(profile.email, "alice@x.com");
    }

    #[tokio::test]
    async fn test_current_user_after_removal() {
        let (repo, service) = service();
        let session = service.sign_up("alice", "alice@x.com", "Passw0rd!").await.unwrap();

        repo.remove(&session.subject).await;

        let subject = service.verify(Some(&session.token)).unwrap();
        assert!(matches!(
            service.current_user(&subject).await,
            Err(DomainError::UserNotFound)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sign_up_has_one_winner() {
        let (repo, service) = service();
        let service = Arc::new(service);

        let mut handles = Vec::new();
        for i in 0..8 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service
                    .sign_up("alice", &format!("alice{}@x.com", i), "Passw0rd!")
                    .await
            }));
        }

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(DomainError::DuplicateUsername(_)) => {}
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.len().await, 1);
    }
}
