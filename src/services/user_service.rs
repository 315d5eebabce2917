use crate::models::user::User;
use crate::repositories::user_repository::{RepositoryError, UserRepository};
use crate::services::password::{hash_blocking, verify_blocking, PasswordError, PasswordHashing};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Email already registered")]
    EmailInUse,
    #[error(transparent)]
    Hashing(#[from] PasswordError),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct RegisterUser {
    pub email: String,
    pub password: String,
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHashing>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHashing>) -> Self {
        Self { repository, hasher }
    }

    pub async fn register(&self, request: RegisterUser) -> Result<User, UserServiceError> {
        // Skip the hashing cost when the email is obviously taken
        if self.repository.find_by_email(&request.email).await?.is_some() {
            return Err(UserServiceError::EmailInUse);
        }

        let password_hash = hash_blocking(self.hasher.clone(), request.password).await?;

        // The UNIQUE constraint still decides a concurrent registration race
        match self
            .repository
            .create_user(&request.email, &password_hash)
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = user.id, "registered user");
                Ok(user)
            }
            Err(RepositoryError::AlreadyExists) => Err(UserServiceError::EmailInUse),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserServiceError> {
        Ok(self.repository.find_by_email(email).await?)
    }

    pub async fn count_users_with_email(&self, email: &str) -> Result<i64, UserServiceError> {
        Ok(self.repository.count_by_email(email).await?)
    }

    pub async fn verify_password(&self, user: &User, password: &str) -> bool {
        verify_blocking(
            self.hasher.clone(),
            password.to_string(),
            user.password_hash.clone(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;
    use crate::services::password::MockPasswordHashing;
    use mockall::predicate::*;

    fn user(id: i64, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn hasher() -> MockPasswordHashing {
        let mut hasher = MockPasswordHashing::new();
        hasher
            .expect_hash()
            .returning(|_| Ok("hash".to_string()));
        hasher
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .with(eq("new@example.com"))
            .times(1)
            .returning(|_| Box::pin(async move { Ok(None) }));

        let created = user(1, "new@example.com");
        mock_repo
            .expect_create_user()
            .with(eq("new@example.com"), eq("hash"))
            .times(1)
            .returning(move |_, _| {
                let user = created.clone();
                Box::pin(async move { Ok(user) })
            });

        let service = UserService::new(Arc::new(mock_repo), Arc::new(hasher()));

        let result = service
            .register(RegisterUser {
                email: "new@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await;

        let user = result.expect("Expected Ok result");
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "new@example.com");
    }

    #[tokio::test]
    async fn test_register_existing_email_skips_hashing() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|email| {
                let existing = user(9, email);
                Box::pin(async move { Ok(Some(existing)) })
            });
        mock_repo.expect_create_user().never();

        let mut hasher = MockPasswordHashing::new();
        hasher.expect_hash().never();

        let service = UserService::new(Arc::new(mock_repo), Arc::new(hasher));

        let result = service
            .register(RegisterUser {
                email: "taken@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserServiceError::EmailInUse)));
    }

    #[tokio::test]
    async fn test_register_unique_violation_race_maps_to_email_in_use() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .returning(|_| Box::pin(async move { Ok(None) }));
        mock_repo
            .expect_create_user()
            .returning(|_, _| Box::pin(async move { Err(RepositoryError::AlreadyExists) }));

        let service = UserService::new(Arc::new(mock_repo), Arc::new(hasher()));

        let result = service
            .register(RegisterUser {
                email: "race@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserServiceError::EmailInUse)));
    }

    #[tokio::test]
    async fn test_register_hashing_failure_is_propagated() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(|_| Box::pin(async move { Ok(None) }));
        mock_repo.expect_create_user().never();

        let mut hasher = MockPasswordHashing::new();
        hasher
            .expect_hash()
            .returning(|_| Err(PasswordError::Hashing("boom".to_string())));

        let service = UserService::new(Arc::new(mock_repo), Arc::new(hasher));

        let result = service
            .register(RegisterUser {
                email: "a@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserServiceError::Hashing(_))));
    }
}
