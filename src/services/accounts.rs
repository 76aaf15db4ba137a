//! Account management and authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{RegisterRequest, Role, UpdateAccount, User, UserClaims, UserProfile},
    repository::Repository,
};

#[derive(Clone)]
pub struct AccountsService {
    repository: Repository,
    config: AuthConfig,
}

impl AccountsService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Create a new account and its profile, returning a session token.
    ///
    /// The profile is created here, synchronously, right after the account
    /// row lands. Every account leaves this function with exactly one
    /// profile, role defaulted to Member.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<(String, User, UserProfile)> {
        request
            .validate()
            .map_err(|e| AppError::Validation(first_validation_message(&e)))?;

        if self
            .repository
            .users
            .username_exists(&request.username, None)
            .await?
        {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;
        let user = self
            .repository
            .users
            .create(&request.username, &password_hash)
            .await?;

        let profile = self.repository.users.ensure_profile(user.id).await?;

        tracing::info!("Registered account '{}' (id={})", user.username, user.id);

        let token = self.issue_token(&user, Some(profile.role))?;
        Ok((token, user, profile))
    }

    /// Authenticate by username and password, returning a session token
    /// and the profile role (absent for legacy accounts without a profile)
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<(String, User, Option<Role>)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let role = self
            .repository
            .users
            .get_profile(user.id)
            .await?
            .map(|profile| profile.role);

        let token = self.issue_token(&user, role)?;
        Ok((token, user, role))
    }

    /// Get an account with its profile
    pub async fn current_account(&self, user_id: i32) -> AppResult<(User, Option<UserProfile>)> {
        let user = self.repository.users.get_by_id(user_id).await?;
        let profile = self.repository.users.get_profile(user_id).await?;
        Ok((user, profile))
    }

    /// Update the caller's own account.
    ///
    /// Also the lazy leg of the profile lifecycle: saving an account that
    /// somehow has no profile (legacy data) creates one with the default
    /// role, idempotently.
    pub async fn update_account(
        &self,
        user_id: i32,
        update: UpdateAccount,
    ) -> AppResult<(User, UserProfile)> {
        update
            .validate()
            .map_err(|e| AppError::Validation(first_validation_message(&e)))?;

        let user = self.repository.users.get_by_id(user_id).await?;

        if let Some(ref username) = update.username {
            if self
                .repository
                .users
                .username_exists(username, Some(user_id))
                .await?
            {
                return Err(AppError::Conflict("Username already exists".to_string()));
            }
        }

        if update.new_password.is_some() {
            let current = update.current_password.as_ref().ok_or_else(|| {
                AppError::Validation("Current password required to change password".to_string())
            })?;
            if !self.verify_password(&user, current)? {
                return Err(AppError::Authentication(
                    "Current password is incorrect".to_string(),
                ));
            }
        }

        let password_hash = match update.new_password {
            Some(ref new_password) => Some(self.hash_password(new_password)?),
            None => None,
        };

        let user = self
            .repository
            .users
            .update_account(user_id, update.username.as_deref(), password_hash.as_deref())
            .await?;

        let profile = self.repository.users.ensure_profile(user_id).await?;

        Ok((user, profile))
    }

    /// Change the role on a user's profile (admin operation)
    pub async fn set_role(&self, user_id: i32, role: Role) -> AppResult<UserProfile> {
        // The target account must exist; a missing profile is healed first.
        self.repository.users.get_by_id(user_id).await?;
        self.repository.users.ensure_profile(user_id).await?;

        let profile = self.repository.users.set_role(user_id, role).await?;
        tracing::info!("Role of user {} set to {}", user_id, profile.role);
        Ok(profile)
    }

    /// Create a session token for a user
    pub fn issue_token(&self, user: &User, role: Option<Role>) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            jti: Uuid::new_v4().to_string(),
            role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

/// Flatten validator output to a single user-facing message
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}

#[cfg(test)]
mod tests {
    use super::first_validation_message;
    use crate::models::user::RegisterRequest;
    use validator::Validate;

    #[test]
    fn short_username_is_rejected_with_its_message() {
        let request = RegisterRequest {
            username: "al".to_string(),
            password: "password".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            first_validation_message(&errors),
            "Username must be at least 3 characters"
        );
    }

    #[test]
    fn valid_registration_passes_validation() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            password: "password".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
