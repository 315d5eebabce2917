use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::services::password::{dummy_verify_blocking, verify_blocking, PasswordHashing};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] crate::repositories::user_repository::RepositoryError),
}

/// Email and raw password as presented by a client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHashing>,
}

impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHashing>) -> Self {
        Self {
            user_repository,
            hasher,
        }
    }

    /// Resolves the user behind `credentials`. An unknown email and a wrong
    /// password are indistinguishable to the caller, both in result and cost.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthServiceError> {
        let Some(user) = self
            .user_repository
            .find_by_email(&credentials.email)
            .await?
        else {
            dummy_verify_blocking(self.hasher.clone(), credentials.password.clone()).await;
            return Err(AuthServiceError::InvalidCredentials);
        };

        let verified = verify_blocking(
            self.hasher.clone(),
            credentials.password.clone(),
            user.password_hash.clone(),
        )
        .await;
        if !verified {
            return Err(AuthServiceError::InvalidCredentials);
        }

        Ok(user)
    }
}
