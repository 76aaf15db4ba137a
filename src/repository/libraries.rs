//! Libraries repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookShort,
        librarian::Librarian,
        library::{Library, LibraryDetail},
    },
};

#[derive(Clone)]
pub struct LibrariesRepository {
    pool: Pool<Postgres>,
}

impl LibrariesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all libraries
    pub async fn list(&self) -> AppResult<Vec<Library>> {
        let libraries = sqlx::query_as::<_, Library>("SELECT id, name FROM libraries ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(libraries)
    }

    /// Get a library by name, with its books and librarian
    pub async fn get_detail_by_name(&self, name: &str) -> AppResult<LibraryDetail> {
        let library = sqlx::query_as::<_, Library>(
            "SELECT id, name FROM libraries WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Library '{}' not found", name)))?;

        let books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.title, a.name as author, b.publication_year
            FROM library_books lb
            JOIN books b ON lb.book_id = b.id
            JOIN authors a ON b.author_id = a.id
            WHERE lb.library_id = $1
            ORDER BY b.title, b.id
            "#,
        )
        .bind(library.id)
        .fetch_all(&self.pool)
        .await?;

        let librarian = sqlx::query_as::<_, Librarian>(
            "SELECT id, name, library_id FROM librarians WHERE library_id = $1",
        )
        .bind(library.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(LibraryDetail {
            id: library.id,
            name: library.name,
            books,
            librarian,
        })
    }

    /// Count all libraries
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM libraries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
