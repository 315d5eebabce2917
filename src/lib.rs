pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use repositories::{SqliteAdventureRepository, SqliteUserRepository};
use services::{AdventureService, AuthService, PasswordHashing, UserService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub adventure_service: Arc<AdventureService>,
}

impl AppState {
    /// Wire the SQLite repositories and services around `pool`.
    pub fn new(pool: sqlx::SqlitePool, hasher: Arc<dyn PasswordHashing>) -> Self {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let adventure_repository = Arc::new(SqliteAdventureRepository::new(pool));

        Self {
            user_service: Arc::new(UserService::new(user_repository.clone(), hasher.clone())),
            auth_service: Arc::new(AuthService::new(user_repository, hasher)),
            adventure_service: Arc::new(AdventureService::new(adventure_repository)),
        }
    }
}
