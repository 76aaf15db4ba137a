//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, dashboards, health, libraries};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.3.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::logout,
        auth::register,
        auth::me,
        auth::update_account,
        auth::update_role,
        // Books
        books::home,
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::confirm_delete_book,
        books::delete_book,
        // Dashboards
        dashboards::admin_dashboard,
        dashboards::librarian_dashboard,
        dashboards::member_dashboard,
        // Libraries
        libraries::library_detail,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::AccountInfo,
            auth::SessionResponse,
            crate::models::user::RegisterRequest,
            crate::models::user::UpdateAccount,
            crate::models::user::UpdateRole,
            crate::models::user::UserProfile,
            crate::models::user::Role,
            // Books
            crate::models::book::Book,
            crate::models::book::BookDetail,
            crate::models::book::BookShort,
            crate::models::book::BookForm,
            crate::models::book::BookFormRejection,
            crate::models::book::DeleteConfirmation,
            books::BookListResponse,
            // Dashboards
            dashboards::DashboardTotals,
            dashboards::AdminDashboard,
            dashboards::LibrarianDashboard,
            dashboards::MemberDashboard,
            // Libraries
            crate::models::author::Author,
            crate::models::library::Library,
            crate::models::library::LibraryDetail,
            crate::models::librarian::Librarian,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication and accounts"),
        (name = "books", description = "Book catalog"),
        (name = "dashboards", description = "Role dashboards"),
        (name = "libraries", description = "Libraries")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
