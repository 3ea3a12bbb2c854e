//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::{NewUser, Store, UserRepoError};
use crate::domain::Identity;
use crate::services::auth_service::UserInfo;
use crate::services::user_service::{
    AdminOverview, CreateUserRequest, OVERVIEW_RECENT_ACTIVITY, UserError, UserService,
};

pub struct SeaOrmUserService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    fn require_admin(actor: &Identity) -> Result<(), UserError> {
        if actor.is_admin {
            Ok(())
        } else {
            Err(UserError::Forbidden)
        }
    }

    fn validate(&self, request: &CreateUserRequest) -> Result<(), UserError> {
        if request.username.trim().is_empty() {
            return Err(UserError::Validation("Username is required".to_string()));
        }

        if request.email.trim().is_empty() || !request.email.contains('@') {
            return Err(UserError::Validation(
                "A valid email address is required".to_string(),
            ));
        }

        if request.password != request.confirm_password {
            return Err(UserError::Validation("Passwords do not match".to_string()));
        }

        if request.password.chars().count() < self.security.min_password_length {
            return Err(UserError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn create_user(
        &self,
        actor: &Identity,
        request: CreateUserRequest,
    ) -> Result<UserInfo, UserError> {
        Self::require_admin(actor)?;
        self.validate(&request)?;

        let new_user = NewUser {
            username: request.username.trim().to_string(),
            email: request.email.trim().to_string(),
            password: request.password,
            is_admin: request.is_admin,
        };

        let user = self
            .store
            .create_user(new_user, &self.security)
            .await
            .map_err(|e| match e {
                UserRepoError::UsernameTaken | UserRepoError::EmailTaken => {
                    UserError::Conflict(e.to_string())
                }
                UserRepoError::Database(err) => UserError::from(err),
            })?;

        info!(actor = %actor.username, user = %user.username, "User created");
        Ok(UserInfo::from(user))
    }

    async fn list_users(&self, actor: &Identity) -> Result<Vec<UserInfo>, UserError> {
        Self::require_admin(actor)?;
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(UserInfo::from).collect())
    }

    async fn delete_user(&self, actor: &Identity, user_id: i32) -> Result<(), UserError> {
        Self::require_admin(actor)?;

        if actor.user_id.value() == user_id {
            return Err(UserError::Validation(
                "You cannot delete your own account".to_string(),
            ));
        }

        let user = self
            .store
            .get_user_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        if !self.store.delete_user(user_id).await? {
            return Err(UserError::NotFound);
        }

        info!(actor = %actor.username, user = %user.username, "User deleted");
        Ok(())
    }

    async fn overview(&self, actor: &Identity) -> Result<AdminOverview, UserError> {
        Self::require_admin(actor)?;

        let users = self.store.list_users().await?;
        let recent_activity = self
            .store
            .get_recent_activity(OVERVIEW_RECENT_ACTIVITY)
            .await?;

        Ok(AdminOverview {
            users: users.into_iter().map(UserInfo::from).collect(),
            recent_activity,
        })
    }
}
