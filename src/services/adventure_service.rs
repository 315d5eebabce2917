use crate::models::adventure::{Adventure, UpdateAdventureRequest};
use crate::models::user::User;
use crate::repositories::adventure_repository::AdventureRepository;
use crate::repositories::user_repository::RepositoryError;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AdventureServiceError {
    #[error("Adventure not found")]
    NotFound,
    #[error("Adventure belongs to another user")]
    Forbidden,
    #[error("Repository error: {0}")]
    RepositoryError(RepositoryError),
}

impl From<RepositoryError> for AdventureServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => AdventureServiceError::NotFound,
            RepositoryError::NotOwner => AdventureServiceError::Forbidden,
            other => AdventureServiceError::RepositoryError(other),
        }
    }
}

pub struct AdventureService {
    repository: Arc<dyn AdventureRepository>,
}

impl AdventureService {
    pub fn new(repository: Arc<dyn AdventureRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        owner: &User,
        title: &str,
        description: &str,
    ) -> Result<Adventure, AdventureServiceError> {
        let adventure = self.repository.create(owner.id, title, description).await?;
        tracing::info!(
            adventure_id = adventure.id,
            owner_id = owner.id,
            "created adventure"
        );
        Ok(adventure)
    }

    pub async fn list(&self) -> Result<Vec<Adventure>, AdventureServiceError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Adventure, AdventureServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AdventureServiceError::NotFound)
    }

    pub async fn update(
        &self,
        id: i64,
        user: &User,
        patch: UpdateAdventureRequest,
    ) -> Result<Adventure, AdventureServiceError> {
        let adventure = self.repository.update_owned(id, user.id, patch).await?;
        tracing::info!(adventure_id = id, owner_id = user.id, "updated adventure");
        Ok(adventure)
    }

    pub async fn delete(&self, id: i64, user: &User) -> Result<(), AdventureServiceError> {
        self.repository.delete_owned(id, user.id).await?;
        tracing::info!(adventure_id = id, owner_id = user.id, "deleted adventure");
        Ok(())
    }
}
