//! Libris Server - Library Management System
//!
//! A Rust REST API server for library management.

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libris_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Libris Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Initialize the revoked-session store
    let sessions = libris_server::services::sessions::SessionStore::new(&config.redis.url)
        .await
        .expect("Failed to connect to Redis");

    tracing::info!("Connected to Redis");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.auth.clone(),
        config.dashboard.clone(),
        sessions,
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router.
///
/// The whole routing table lives here, assembled once at startup.
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication & accounts
        .route("/login/", post(api::auth::login))
        .route("/logout/", post(api::auth::logout))
        .route("/register/", post(api::auth::register))
        .route("/me/", get(api::auth::me))
        .route("/profile/", put(api::auth::update_account))
        .route("/users/:id/role/", put(api::auth::update_role))
        // Books
        .route("/", get(api::books::home))
        .route("/list/", get(api::books::list_books))
        .route("/books/add/", post(api::books::create_book))
        .route("/books/:id/", get(api::books::get_book))
        .route("/books/:id/edit/", post(api::books::update_book))
        .route(
            "/books/:id/delete/",
            get(api::books::confirm_delete_book).post(api::books::delete_book),
        )
        // Role dashboards
        .route("/admin-dashboard/", get(api::dashboards::admin_dashboard))
        .route(
            "/librarian-dashboard/",
            get(api::dashboards::librarian_dashboard),
        )
        .route("/member-dashboard/", get(api::dashboards::member_dashboard))
        // Library detail by name (keep last: catch-all over single segments)
        .route("/:title/", get(api::libraries::library_detail))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(openapi)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
}
