//! Domain service for user administration.
//!
//! Every operation takes the caller's [`Identity`] and refuses non-admins.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Identity;
use crate::models::activity::ActivityEntry;
use crate::services::auth_service::UserInfo;

/// Number of activities shown on the admin overview.
pub const OVERVIEW_RECENT_ACTIVITY: u64 = 10;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Admin access required")]
    Forbidden,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("User not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminOverview {
    pub users: Vec<UserInfo>,
    pub recent_activity: Vec<ActivityEntry>,
}

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Creates an account.
    ///
    /// # Errors
    ///
    /// - [`UserError::Validation`] when fields are empty, the passwords differ
    ///   or the password is too short
    /// - [`UserError::Conflict`] when the username or email is taken
    async fn create_user(
        &self,
        actor: &Identity,
        request: CreateUserRequest,
    ) -> Result<UserInfo, UserError>;

    async fn list_users(&self, actor: &Identity) -> Result<Vec<UserInfo>, UserError>;

    /// Deletes an account together with its activity history.
    /// Admins cannot delete themselves.
    async fn delete_user(&self, actor: &Identity, user_id: i32) -> Result<(), UserError>;

    /// All users plus the most recent activity across everyone.
    async fn overview(&self, actor: &Identity) -> Result<AdminOverview, UserError>;
}
