//! Users and profiles repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{Role, User, UserProfile},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at, updated_at FROM users WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if username already exists
    pub async fn username_exists(&self, username: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER($1) AND id != $2)",
            )
            .bind(username)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER($1))")
                .bind(username)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create a new user account
    pub async fn create(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let now = Utc::now();

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (username, password, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing account (username and/or password)
    pub async fn update_account(
        &self,
        id: i32,
        username: Option<&str>,
        password_hash: Option<&str>,
    ) -> AppResult<User> {
        let now = Utc::now();

        let mut sets = vec!["updated_at = $1".to_string()];
        let mut param_idx = 2;

        if username.is_some() {
            sets.push(format!("username = ${}", param_idx));
            param_idx += 1;
        }
        if password_hash.is_some() {
            sets.push(format!("password = ${}", param_idx));
        }

        let query = format!("UPDATE users SET {} WHERE id = {}", sets.join(", "), id);

        let mut builder = sqlx::query(&query).bind(now);
        if let Some(name) = username {
            builder = builder.bind(name);
        }
        if let Some(hash) = password_hash {
            builder = builder.bind(hash);
        }

        let updated = builder.execute(&self.pool).await?;
        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Get the profile for a user, if one exists
    pub async fn get_profile(&self, user_id: i32) -> AppResult<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(
            "SELECT user_id, role FROM user_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Get-or-create the profile for a user with the default role.
    ///
    /// Idempotent and race-tolerant: a concurrent duplicate insert lands on
    /// the ON CONFLICT arm and both callers read back the one surviving row.
    pub async fn ensure_profile(&self, user_id: i32) -> AppResult<UserProfile> {
        sqlx::query("INSERT INTO user_profiles (user_id, role) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .bind(Role::default())
            .execute(&self.pool)
            .await?;

        self.get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Profile missing for user {}", user_id)))
    }

    /// Set the role on a user's profile
    pub async fn set_role(&self, user_id: i32, role: Role) -> AppResult<UserProfile> {
        let updated = sqlx::query("UPDATE user_profiles SET role = $1 WHERE user_id = $2")
            .bind(role)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Profile for user {} not found",
                user_id
            )));
        }

        self.get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Profile missing for user {}", user_id)))
    }

    /// Count all users
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
