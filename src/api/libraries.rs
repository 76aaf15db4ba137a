//! Library endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::library::LibraryDetail};

/// Library detail by name, with its books and librarian
#[utoipa::path(
    get,
    path = "/{title}/",
    tag = "libraries",
    params(
        ("title" = String, Path, description = "Library name")
    ),
    responses(
        (status = 200, description = "Library details", body = LibraryDetail),
        (status = 404, description = "Library not found")
    )
)]
pub async fn library_detail(
    State(state): State<crate::AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<LibraryDetail>> {
    let library = state.services.catalog.library_detail(&title).await?;
    Ok(Json(library))
}
