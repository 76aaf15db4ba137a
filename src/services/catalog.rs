//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookDetail, BookForm, BookShort, DeleteConfirmation},
        library::{Library, LibraryDetail},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Database pool, for connectivity probes
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.repository.pool
    }

    /// List all books with authors embedded
    pub async fn list_books_detailed(&self) -> AppResult<Vec<BookDetail>> {
        self.repository.books.list_detailed().await
    }

    /// List all books as compact rows
    pub async fn list_books(&self) -> AppResult<Vec<BookShort>> {
        self.repository.books.list_short(None).await
    }

    /// Get book by ID with full details
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetail> {
        self.repository.books.get_detail(id).await
    }

    /// Create a book from raw form values.
    ///
    /// The only validation is presence of title and author; the author name
    /// is free text, resolved to an author record on the way in.
    pub async fn create_book(&self, form: &BookForm) -> AppResult<BookDetail> {
        let (title, author_name) = accepted_fields(form)?;

        let author = self.repository.authors.get_or_create(author_name).await?;
        let book = self
            .repository
            .books
            .create(title, author.id, form.publication_year)
            .await?;

        tracing::info!("Created book '{}' (id={})", book.title, book.id);
        Ok(book)
    }

    /// Update a book from raw form values
    pub async fn update_book(&self, id: i32, form: &BookForm) -> AppResult<BookDetail> {
        let (title, author_name) = accepted_fields(form)?;

        let author = self.repository.authors.get_or_create(author_name).await?;
        let book = self
            .repository
            .books
            .update(id, title, author.id, form.publication_year)
            .await?;

        tracing::info!("Updated book '{}' (id={})", book.title, book.id);
        Ok(book)
    }

    /// Context for the first, unconfirmed delete request
    pub async fn delete_confirmation(&self, id: i32) -> AppResult<DeleteConfirmation> {
        let book = self.repository.books.get_detail(id).await?;
        let message = format!(
            "Deleting '{}' cannot be undone. Resend as a POST request to confirm.",
            book.title
        );
        Ok(DeleteConfirmation { book, message })
    }

    /// Delete a book after confirmation
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    /// List all libraries
    pub async fn list_libraries(&self) -> AppResult<Vec<Library>> {
        self.repository.libraries.list().await
    }

    /// Get a library by name, with its books and librarian
    pub async fn library_detail(&self, name: &str) -> AppResult<LibraryDetail> {
        self.repository.libraries.get_detail_by_name(name).await
    }
}

/// Check presence of title and author on a submitted form
fn accepted_fields(form: &BookForm) -> AppResult<(&str, &str)> {
    let title = form
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;

    let author = form
        .author
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| AppError::Validation("Author is required".to_string()))?;

    Ok((title, author))
}

#[cfg(test)]
mod tests {
    use super::accepted_fields;
    use crate::{error::AppError, models::book::BookForm};

    #[test]
    fn missing_title_is_rejected() {
        let form = BookForm {
            title: None,
            author: Some("Woolf".to_string()),
            publication_year: None,
        };
        match accepted_fields(&form) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Title is required"),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn blank_title_is_rejected() {
        let form = BookForm {
            title: Some("   ".to_string()),
            author: Some("Woolf".to_string()),
            publication_year: None,
        };
        assert!(matches!(
            accepted_fields(&form),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn missing_author_is_rejected() {
        let form = BookForm {
            title: Some("Orlando".to_string()),
            author: None,
            publication_year: None,
        };
        match accepted_fields(&form) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Author is required"),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn present_fields_are_trimmed_and_accepted() {
        let form = BookForm {
            title: Some("  Orlando ".to_string()),
            author: Some(" Virginia Woolf ".to_string()),
            publication_year: Some(1928),
        };
        let (title, author) = accepted_fields(&form).unwrap();
        assert_eq!(title, "Orlando");
        assert_eq!(author, "Virginia Woolf");
    }
}
