//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::author::Author;

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub publication_year: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Book with its author embedded, for detail-style listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookDetail {
    pub id: i32,
    pub title: String,
    pub author: Author,
    pub publication_year: Option<i32>,
}

/// Internal row structure for joined book queries
#[derive(Debug, Clone, FromRow)]
pub struct BookDetailRow {
    pub id: i32,
    pub title: String,
    pub publication_year: Option<i32>,
    pub author_id: i32,
    pub author_name: String,
}

impl From<BookDetailRow> for BookDetail {
    fn from(row: BookDetailRow) -> Self {
        BookDetail {
            id: row.id,
            title: row.title,
            author: Author {
                id: row.author_id,
                name: row.author_name,
            },
            publication_year: row.publication_year,
        }
    }
}

/// Compact book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub publication_year: Option<i32>,
}

/// Raw book form values, as submitted.
///
/// The author is free text; it is resolved to an author record on save.
/// Everything except presence of title and author is accepted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i32>,
}

/// Re-rendered form after a rejected submission: the message plus the
/// submitted values, so nothing the caller typed is lost.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookFormRejection {
    pub error: String,
    pub values: BookForm,
}

/// Context returned by the first (unconfirmed) delete request
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteConfirmation {
    pub book: BookDetail,
    pub message: String,
}
