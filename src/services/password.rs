use argon2::{
    password_hash::{PasswordHash, PasswordHasher, SaltString},
    Algorithm, Argon2, Params, PasswordVerifier, Version,
};
use once_cell::sync::OnceCell;
use rand::rngs::OsRng;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Invalid hashing parameters: {0}")]
    Params(String),
}

/// One-way salted password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHashing: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Constant-time comparison of `password` against a stored PHC string.
    /// A malformed hash never matches.
    fn verify(&self, password: &str, password_hash: &str) -> bool;

    /// Burns one verification against a throwaway hash so that a lookup miss
    /// costs as much as a wrong password.
    fn dummy_verify(&self, password: &str);
}

// Argon2 is CPU-bound; these run it on the blocking pool.

pub async fn hash_blocking(
    hasher: Arc<dyn PasswordHashing>,
    password: String,
) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| PasswordError::Hashing(e.to_string()))?
}

/// A verification task that fails to complete never matches.
pub async fn verify_blocking(
    hasher: Arc<dyn PasswordHashing>,
    password: String,
    password_hash: String,
) -> bool {
    tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
        .await
        .unwrap_or(false)
}

pub async fn dummy_verify_blocking(hasher: Arc<dyn PasswordHashing>, password: String) {
    let _ = tokio::task::spawn_blocking(move || hasher.dummy_verify(&password)).await;
}

pub struct Argon2Hashing {
    params: Params,
    dummy_hash: OnceCell<String>,
}

impl Default for Argon2Hashing {
    fn default() -> Self {
        Self {
            params: Params::default(),
            dummy_hash: OnceCell::new(),
        }
    }
}

impl Argon2Hashing {
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, PasswordError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| PasswordError::Params(e.to_string()))?;
        Ok(Self {
            params,
            dummy_hash: OnceCell::new(),
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHashing for Argon2Hashing {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hashing(e.to_string()))
    }

    fn verify(&self, password: &str, password_hash: &str) -> bool {
        if let Ok(parsed_hash) = PasswordHash::new(password_hash) {
            self.argon2()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        } else {
            false
        }
    }

    fn dummy_verify(&self, password: &str) {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| self.hash("dummy-password-never-matches"));
        if let Ok(hash) = hash {
            let _ = self.verify(password, hash);
        }
    }
}
