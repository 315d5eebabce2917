pub mod adventure_service;
pub mod auth_service;
pub mod password;
pub mod user_service;

pub use adventure_service::{AdventureService, AdventureServiceError};
pub use auth_service::{AuthService, AuthServiceError, Credentials};
pub use password::{Argon2Hashing, PasswordError, PasswordHashing};
pub use user_service::{RegisterUser, UserService, UserServiceError};
