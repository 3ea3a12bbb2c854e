//! Domain service for authentication.
//!
//! Handles login, identity resolution for sessions and API keys, password
//! changes, and API key management.

use serde::Serialize;
use thiserror::Error;

use crate::db::User;
use crate::domain::Identity;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// User info DTO for responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Login result containing user info and API key.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user: UserInfo,
    pub api_key: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the account with its API key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Resolves a session's stored user id. Deleted accounts resolve to `None`.
    async fn identity_for_user(&self, user_id: i32) -> Result<Option<Identity>, AuthError>;

    /// Resolves an API key to the identity of its owner.
    async fn identity_for_api_key(&self, api_key: &str) -> Result<Option<Identity>, AuthError>;

    async fn get_user_info(&self, identity: &Identity) -> Result<UserInfo, AuthError>;

    /// Changes the caller's password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if the current password is wrong
    /// or the new one is too short or unchanged.
    async fn change_password(
        &self,
        identity: &Identity,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    /// Regenerates the API key for the caller and returns the new one.
    async fn regenerate_api_key(&self, identity: &Identity) -> Result<String, AuthError>;
}
