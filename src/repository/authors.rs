//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::author::Author};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get the author with this name, creating it if absent.
    ///
    /// The upsert keeps concurrent callers safe: both end up with the same
    /// row, whichever insert wins.
    pub async fn get_or_create(&self, name: &str) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name) VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(author)
    }

    /// Count all authors
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
