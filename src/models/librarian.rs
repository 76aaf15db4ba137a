//! Librarian model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A librarian attached one-to-one to a library
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Librarian {
    pub id: i32,
    pub name: String,
    pub library_id: i32,
}
