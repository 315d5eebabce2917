pub mod test_helpers {
    use crate::{
        middleware::SecurityHeaders,
        routes,
        services::{Argon2Hashing, PasswordHashing},
        AppState,
    };
    use axum::Router;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use sqlx::{
        sqlite::{SqliteConnectOptions, SqlitePoolOptions},
        SqlitePool,
    };
    use std::{str::FromStr, sync::Arc};
    use tempfile::NamedTempFile;

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    /// Useful when concurrent connections are needed
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .foreign_keys(true)
            .busy_timeout(crate::db::BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok((pool, temp_file))
    }

    /// Argon2 with minimal cost so tests hash in microseconds
    pub fn fast_hasher() -> Arc<dyn PasswordHashing> {
        match Argon2Hashing::with_params(1024, 1, 1) {
            Ok(hasher) => Arc::new(hasher),
            Err(_) => Arc::new(Argon2Hashing::default()),
        }
    }

    pub fn test_state(pool: SqlitePool) -> AppState {
        AppState::new(pool, fast_hasher())
    }

    /// The full router over a fresh in-memory database
    pub async fn test_app() -> Result<(Router, SqlitePool), sqlx::Error> {
        let pool = create_test_db().await?;
        let app = routes::app(test_state(pool.clone()), SecurityHeaders { hsts: false });
        Ok((app, pool))
    }

    /// Insert a test user with hashed password
    pub async fn insert_test_user(
        pool: &SqlitePool,
        email: &str,
        password: &str,
    ) -> Result<i64, sqlx::Error> {
        let password_hash = fast_hasher().hash(password).map_err(|e| {
            sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
        })?;

        let result = sqlx::query("INSERT INTO user (email, password_hash) VALUES (?, ?)")
            .bind(email)
            .bind(password_hash)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert an adventure directly, bypassing the service layer
    pub async fn insert_test_adventure(
        pool: &SqlitePool,
        owner_id: i64,
        title: &str,
        description: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO adventure (title, description, created_at, owner_id) VALUES (?, ?, ?, ?)",
        )
        .bind(title)
        .bind(description)
        .bind(chrono::Utc::now())
        .bind(owner_id)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// `Authorization` header value for the given credentials
    pub fn basic_auth_header(email: &str, password: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:{}", email, password)))
    }
}

// Re-export commonly used test functions at module level for convenience
// Note: This is test-only code. Panic on error is acceptable in tests.
#[cfg(test)]
pub async fn create_test_pool() -> sqlx::SqlitePool {
    match test_helpers::create_test_db().await {
        Ok(pool) => pool,
        Err(e) => panic!("Failed to create test pool: {}", e),
    }
}
