//! Books repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{BookDetail, BookDetailRow, BookShort},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books with their authors embedded
    pub async fn list_detailed(&self) -> AppResult<Vec<BookDetail>> {
        let rows = sqlx::query_as::<_, BookDetailRow>(
            r#"
            SELECT b.id, b.title, b.publication_year, a.id as author_id, a.name as author_name
            FROM books b
            JOIN authors a ON b.author_id = a.id
            ORDER BY b.title, b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BookDetail::from).collect())
    }

    /// List books as compact rows, optionally bounded to the first `limit`
    pub async fn list_short(&self, limit: Option<i64>) -> AppResult<Vec<BookShort>> {
        let mut query = String::from(
            r#"
            SELECT b.id, b.title, a.name as author, b.publication_year
            FROM books b
            JOIN authors a ON b.author_id = a.id
            ORDER BY b.title, b.id
            "#,
        );
        if limit.is_some() {
            query.push_str(" LIMIT $1");
        }

        let mut builder = sqlx::query_as::<_, BookShort>(&query);
        if let Some(n) = limit {
            builder = builder.bind(n);
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Get book by ID with its author
    pub async fn get_detail(&self, id: i32) -> AppResult<BookDetail> {
        let row = sqlx::query_as::<_, BookDetailRow>(
            r#"
            SELECT b.id, b.title, b.publication_year, a.id as author_id, a.name as author_name
            FROM books b
            JOIN authors a ON b.author_id = a.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        Ok(BookDetail::from(row))
    }

    /// Create a new book
    pub async fn create(
        &self,
        title: &str,
        author_id: i32,
        publication_year: Option<i32>,
    ) -> AppResult<BookDetail> {
        let now = Utc::now();

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, author_id, publication_year, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(author_id)
        .bind(publication_year)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.get_detail(id).await
    }

    /// Update an existing book
    pub async fn update(
        &self,
        id: i32,
        title: &str,
        author_id: i32,
        publication_year: Option<i32>,
    ) -> AppResult<BookDetail> {
        let now = Utc::now();

        let updated = sqlx::query(
            r#"
            UPDATE books
            SET title = $1, author_id = $2, publication_year = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(title)
        .bind(author_id)
        .bind(publication_year)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        self.get_detail(id).await
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
