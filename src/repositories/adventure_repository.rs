use crate::models::adventure::{Adventure, UpdateAdventureRequest};
use crate::repositories::user_repository::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AdventureRepository: Send + Sync {
    async fn create(
        &self,
        owner_id: i64,
        title: &str,
        description: &str,
    ) -> RepositoryResult<Adventure>;
    async fn find_all(&self) -> RepositoryResult<Vec<Adventure>>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Adventure>>;
    /// Applies `patch` if the adventure exists and belongs to `owner_id`.
    /// The owner-scoped write and the read-back share one transaction.
    async fn update_owned(
        &self,
        id: i64,
        owner_id: i64,
        patch: UpdateAdventureRequest,
    ) -> RepositoryResult<Adventure>;
    async fn delete_owned(&self, id: i64, owner_id: i64) -> RepositoryResult<()>;
}

pub struct SqliteAdventureRepository {
    pool: SqlitePool,
}

impl SqliteAdventureRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_joined(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Adventure>, sqlx::Error> {
        sqlx::query_as::<_, Adventure>(
            r#"
            SELECT
                a.id,
                a.title,
                a.description,
                a.created_at,
                a.owner_id,
                u.email AS owner_email
            FROM adventure a
            JOIN user u ON u.id = a.owner_id
            WHERE a.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    async fn fetch_owned(
        conn: &mut SqliteConnection,
        id: i64,
        owner_id: i64,
    ) -> RepositoryResult<Adventure> {
        let adventure = Self::fetch_joined(conn, id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        if !adventure.is_owned_by(owner_id) {
            return Err(RepositoryError::NotOwner);
        }

        Ok(adventure)
    }

    /// Why an owner-scoped write matched no row.
    async fn rejection(conn: &mut SqliteConnection, id: i64) -> RepositoryError {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM adventure WHERE id = ?")
            .bind(id)
            .fetch_one(conn)
            .await;

        match exists {
            Ok(0) => RepositoryError::NotFound,
            Ok(_) => RepositoryError::NotOwner,
            Err(e) => RepositoryError::Database(e),
        }
    }
}

#[async_trait]
impl AdventureRepository for SqliteAdventureRepository {
    async fn create(
        &self,
        owner_id: i64,
        title: &str,
        description: &str,
    ) -> RepositoryResult<Adventure> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO adventure (title, description, created_at, owner_id) VALUES (?, ?, ?, ?)",
        )
        .bind(title)
        .bind(description)
        .bind(Utc::now())
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        let adventure = Self::fetch_joined(&mut *tx, result.last_insert_rowid())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        tx.commit().await?;
        Ok(adventure)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Adventure>> {
        let adventures = sqlx::query_as::<_, Adventure>(
            r#"
            SELECT
                a.id,
                a.title,
                a.description,
                a.created_at,
                a.owner_id,
                u.email AS owner_email
            FROM adventure a
            JOIN user u ON u.id = a.owner_id
            ORDER BY a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(adventures)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Adventure>> {
        let mut conn = self.pool.acquire().await?;
        Ok(Self::fetch_joined(&mut *conn, id).await?)
    }

    async fn update_owned(
        &self,
        id: i64,
        owner_id: i64,
        patch: UpdateAdventureRequest,
    ) -> RepositoryResult<Adventure> {
        if patch.is_empty() {
            let mut conn = self.pool.acquire().await?;
            return Self::fetch_owned(&mut *conn, id, owner_id).await;
        }

        // The write comes first so the transaction takes SQLite's write lock
        // up front instead of upgrading from a read lock.
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE adventure SET title = COALESCE(?, title), \
             description = COALESCE(?, description) WHERE id = ? AND owner_id = ?",
        )
        .bind(patch.title)
        .bind(patch.description)
        .bind(id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Self::rejection(&mut *tx, id).await);
        }

        let updated = Self::fetch_joined(&mut *tx, id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete_owned(&self, id: i64, owner_id: i64) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM adventure WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Self::rejection(&mut *tx, id).await);
        }

        tx.commit().await?;
        Ok(())
    }
}
