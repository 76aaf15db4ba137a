//! Redis-backed store of revoked session tokens
//!
//! Logout puts the token id on a denylist that outlives the process; entries
//! expire together with the token itself.

use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct SessionStore {
    client: Client,
}

impl SessionStore {
    /// Create a new session store
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    /// Revoke a token id until its natural expiry
    pub async fn revoke_token(&self, jti: &str, ttl_seconds: u64) -> AppResult<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let key = format!("revoked:{}", jti);
        conn.set_ex::<_, _, ()>(&key, "1", ttl_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to revoke token in Redis: {}", e)))?;

        Ok(())
    }

    /// Check whether a token id has been revoked
    pub async fn is_revoked(&self, jti: &str) -> AppResult<bool> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let key = format!("revoked:{}", jti);
        let exists: bool = conn
            .exists(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to check token in Redis: {}", e)))?;

        Ok(exists)
    }
}
