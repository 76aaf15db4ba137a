//! API handlers for Libris REST endpoints

pub mod auth;
pub mod books;
pub mod dashboards;
pub mod health;
pub mod libraries;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    response::Redirect,
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Login entry point unauthorized callers are sent to
pub const LOGIN_PATH: &str = "/login/";

/// Redirect an unauthorized caller to the login entry point
pub fn redirect_to_login() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

async fn bearer_claims(parts: &Parts, state: &AppState) -> Result<UserClaims, AppError> {
    // Get the Authorization header
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

    // Check for Bearer token
    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Authentication(
            "Invalid authorization header format".to_string(),
        ));
    }

    let token = &auth_header[7..];

    // Validate JWT token using the secret from configuration
    let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
        .map_err(|e| AppError::Authentication(e.to_string()))?;

    // A logged-out token no longer authenticates
    if state.services.sessions.is_revoked(&claims.jti).await? {
        return Err(AppError::Authentication(
            "Session has been terminated".to_string(),
        ));
    }

    Ok(claims)
}

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state).await?;
        Ok(AuthenticatedUser(claims))
    }
}

/// Extractor for an optionally-authenticated caller.
///
/// Never rejects: role and permission gates decide what to do with an
/// anonymous caller (usually redirect to login).
pub struct MaybeUser(pub Option<UserClaims>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(bearer_claims(parts, state).await.ok()))
    }
}
