//! Role-gated dashboard endpoints
//!
//! Each dashboard is reachable only by callers the matching role predicate
//! accepts; everyone else is redirected to the login entry point.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    access,
    error::AppResult,
    models::{book::BookShort, library::Library, user::Role},
};

use super::{redirect_to_login, MaybeUser};

/// Aggregate counts shown to admins
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardTotals {
    pub books: i64,
    pub authors: i64,
    pub libraries: i64,
    pub users: i64,
}

/// Admin dashboard context
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDashboard {
    pub role: Role,
    pub message: String,
    pub totals: DashboardTotals,
}

/// Librarian dashboard context
#[derive(Debug, Serialize, ToSchema)]
pub struct LibrarianDashboard {
    pub role: Role,
    pub message: String,
    pub books: Vec<BookShort>,
    pub libraries: Vec<Library>,
}

/// Member dashboard context
#[derive(Debug, Serialize, ToSchema)]
pub struct MemberDashboard {
    pub role: Role,
    pub message: String,
    pub books: Vec<BookShort>,
}

/// Admin dashboard: aggregate counts
#[utoipa::path(
    get,
    path = "/admin-dashboard/",
    tag = "dashboards",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin dashboard context", body = AdminDashboard),
        (status = 303, description = "Not an admin, redirected to login")
    )
)]
pub async fn admin_dashboard(
    State(state): State<crate::AppState>,
    MaybeUser(who): MaybeUser,
) -> AppResult<Response> {
    if !access::is_admin(who.as_ref()) {
        return Ok(redirect_to_login().into_response());
    }

    let context = state.services.dashboards.admin_context().await?;
    Ok(Json(context).into_response())
}

/// Librarian dashboard: the full book and library collections
#[utoipa::path(
    get,
    path = "/librarian-dashboard/",
    tag = "dashboards",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Librarian dashboard context", body = LibrarianDashboard),
        (status = 303, description = "Not a librarian, redirected to login")
    )
)]
pub async fn librarian_dashboard(
    State(state): State<crate::AppState>,
    MaybeUser(who): MaybeUser,
) -> AppResult<Response> {
    if !access::is_librarian(who.as_ref()) {
        return Ok(redirect_to_login().into_response());
    }

    let context = state.services.dashboards.librarian_context().await?;
    Ok(Json(context).into_response())
}

/// Member dashboard: a bounded shelf of books
#[utoipa::path(
    get,
    path = "/member-dashboard/",
    tag = "dashboards",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Member dashboard context", body = MemberDashboard),
        (status = 303, description = "Not a member, redirected to login")
    )
)]
pub async fn member_dashboard(
    State(state): State<crate::AppState>,
    MaybeUser(who): MaybeUser,
) -> AppResult<Response> {
    if !access::is_member(who.as_ref()) {
        return Ok(redirect_to_login().into_response());
    }

    let context = state.services.dashboards.member_context().await?;
    Ok(Json(context).into_response())
}
