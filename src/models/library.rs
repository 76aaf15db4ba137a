//! Library model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::{book::BookShort, librarian::Librarian};

/// Full library model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Library {
    pub id: i32,
    pub name: String,
}

/// Library with its books and librarian, for the detail view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LibraryDetail {
    pub id: i32,
    pub name: String,
    pub books: Vec<BookShort>,
    pub librarian: Option<Librarian>,
}
