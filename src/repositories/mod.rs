pub mod adventure_repository;
pub mod user_repository;

pub use adventure_repository::{AdventureRepository, SqliteAdventureRepository};
pub use user_repository::{
    RepositoryError, RepositoryResult, SqliteUserRepository, UserRepository,
};
