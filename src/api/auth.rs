//! Authentication and account endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    access,
    error::AppResult,
    models::user::{RegisterRequest, Role, UpdateAccount, UpdateRole, UserProfile},
};

use super::{redirect_to_login, AuthenticatedUser, MaybeUser};

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Authenticated account summary
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountInfo {
    pub id: i32,
    pub username: String,
    pub role: Option<Role>,
}

/// Login / registration response
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub token_type: String,
    pub user: AccountInfo,
}

/// Authenticate and open a session
#[utoipa::path(
    post,
    path = "/login/",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = SessionResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<SessionResponse>> {
    let (token, user, role) = state
        .services
        .accounts
        .authenticate(&request.username, &request.password)
        .await?;

    Ok(Json(SessionResponse {
        token,
        token_type: "Bearer".to_string(),
        user: AccountInfo {
            id: user.id,
            username: user.username,
            role,
        },
    }))
}

/// Terminate the presented session
#[utoipa::path(
    post,
    path = "/logout/",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Session terminated"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<StatusCode> {
    let remaining = (claims.exp - Utc::now().timestamp()).max(1) as u64;
    state
        .services
        .sessions
        .revoke_token(&claims.jti, remaining)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Create an account (and, implicitly, its profile)
#[utoipa::path(
    post,
    path = "/register/",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    let (token, user, profile) = state.services.accounts.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            token_type: "Bearer".to_string(),
            user: AccountInfo {
                id: user.id,
                username: user.username,
                role: Some(profile.role),
            },
        }),
    ))
}

/// Current account with its profile role
#[utoipa::path(
    get,
    path = "/me/",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = AccountInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<AccountInfo>> {
    let (user, profile) = state.services.accounts.current_account(claims.user_id).await?;

    Ok(Json(AccountInfo {
        id: user.id,
        username: user.username,
        role: profile.map(|p| p.role),
    }))
}

/// Update own account (username, password)
#[utoipa::path(
    put,
    path = "/profile/",
    tag = "auth",
    security(("bearer_auth" = [])),
    request_body = UpdateAccount,
    responses(
        (status = 200, description = "Account updated", body = AccountInfo),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated or wrong current password")
    )
)]
pub async fn update_account(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(update): Json<UpdateAccount>,
) -> AppResult<Json<AccountInfo>> {
    let (user, profile) = state
        .services
        .accounts
        .update_account(claims.user_id, update)
        .await?;

    Ok(Json(AccountInfo {
        id: user.id,
        username: user.username,
        role: Some(profile.role),
    }))
}

/// Change a user's profile role (Admin only)
#[utoipa::path(
    put,
    path = "/users/{id}/role/",
    tag = "auth",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateRole,
    responses(
        (status = 200, description = "Role updated", body = UserProfile),
        (status = 303, description = "Not an admin, redirected to login"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_role(
    State(state): State<crate::AppState>,
    MaybeUser(who): MaybeUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRole>,
) -> AppResult<Response> {
    if !access::is_admin(who.as_ref()) {
        return Ok(redirect_to_login().into_response());
    }

    let profile = state.services.accounts.set_role(id, request.role).await?;
    Ok(Json(profile).into_response())
}
