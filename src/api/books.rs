//! Book list and CRUD endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    access::{self, Permission},
    error::{AppError, AppResult},
    models::book::{BookDetail, BookForm, BookFormRejection, BookShort, DeleteConfirmation},
};

use super::{redirect_to_login, MaybeUser};

/// Book list with the transient notice carried over from a redirect
#[derive(Debug, Serialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<BookShort>,
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookListQuery {
    pub notice: Option<String>,
}

fn book_list_redirect(notice: &str) -> Redirect {
    Redirect::to(&format!("/list/?notice={}", notice.replace(' ', "+")))
}

/// Re-render a rejected form submission with its values, or pass the error on
fn form_rejection(form: BookForm, err: AppError) -> AppResult<Response> {
    match err {
        AppError::Validation(error) => Ok((
            StatusCode::BAD_REQUEST,
            Json(BookFormRejection {
                error,
                values: form,
            }),
        )
            .into_response()),
        other => Err(other),
    }
}

/// List all books with authors embedded (detail-style)
#[utoipa::path(
    get,
    path = "/",
    tag = "books",
    responses(
        (status = 200, description = "All books with authors", body = [BookDetail])
    )
)]
pub async fn home(State(state): State<crate::AppState>) -> AppResult<Json<Vec<BookDetail>>> {
    let books = state.services.catalog.list_books_detailed().await?;
    Ok(Json(books))
}

/// List all books
#[utoipa::path(
    get,
    path = "/list/",
    tag = "books",
    params(
        ("notice" = Option<String>, Query, description = "Transient notice from a redirect")
    ),
    responses(
        (status = 200, description = "All books", body = BookListResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookListQuery>,
) -> AppResult<Json<BookListResponse>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(BookListResponse {
        books,
        notice: query.notice,
    }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}/",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetail),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetail>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Create a book from submitted form values
#[utoipa::path(
    post,
    path = "/books/add/",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookForm,
    responses(
        (status = 303, description = "Created, redirected to the book list"),
        (status = 400, description = "Missing title or author", body = BookFormRejection)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    MaybeUser(who): MaybeUser,
    Json(form): Json<BookForm>,
) -> AppResult<Response> {
    if !access::has_permission(who.as_ref(), Permission::AddBook) {
        return Ok(redirect_to_login().into_response());
    }

    match state.services.catalog.create_book(&form).await {
        Ok(_) => Ok(book_list_redirect("Book created").into_response()),
        Err(err) => form_rejection(form, err),
    }
}

/// Update a book from submitted form values
#[utoipa::path(
    post,
    path = "/books/{id}/edit/",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookForm,
    responses(
        (status = 303, description = "Updated, redirected to the book list"),
        (status = 400, description = "Missing title or author", body = BookFormRejection),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    MaybeUser(who): MaybeUser,
    Path(id): Path<i32>,
    Json(form): Json<BookForm>,
) -> AppResult<Response> {
    if !access::has_permission(who.as_ref(), Permission::ChangeBook) {
        return Ok(redirect_to_login().into_response());
    }

    match state.services.catalog.update_book(id, &form).await {
        Ok(_) => Ok(book_list_redirect("Book updated").into_response()),
        Err(err) => form_rejection(form, err),
    }
}

/// First step of deletion: the confirmation context. Nothing is removed.
#[utoipa::path(
    get,
    path = "/books/{id}/delete/",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Confirmation required", body = DeleteConfirmation),
        (status = 404, description = "Book not found")
    )
)]
pub async fn confirm_delete_book(
    State(state): State<crate::AppState>,
    MaybeUser(who): MaybeUser,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    if !access::has_permission(who.as_ref(), Permission::DeleteBook) {
        return Ok(redirect_to_login().into_response());
    }

    let confirmation = state.services.catalog.delete_confirmation(id).await?;
    Ok(Json(confirmation).into_response())
}

/// Second, confirmed step of deletion
#[utoipa::path(
    post,
    path = "/books/{id}/delete/",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 303, description = "Deleted, redirected to the book list"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    MaybeUser(who): MaybeUser,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    if !access::has_permission(who.as_ref(), Permission::DeleteBook) {
        return Ok(redirect_to_login().into_response());
    }

    state.services.catalog.delete_book(id).await?;
    Ok(book_list_redirect("Book deleted").into_response())
}
