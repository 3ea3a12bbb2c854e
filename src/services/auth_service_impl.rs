//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::domain::Identity;
use crate::services::auth_service::{AuthError, AuthService, LoginResult, UserInfo};
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let is_valid = self.store.verify_user_password(username, password).await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let api_key = user.api_key.clone();
        Ok(LoginResult {
            user: UserInfo::from(user),
            api_key,
        })
    }

    async fn identity_for_user(&self, user_id: i32) -> Result<Option<Identity>, AuthError> {
        let user = self.store.get_user_by_id(user_id).await?;
        Ok(user.map(|u| u.identity()))
    }

    async fn identity_for_api_key(&self, api_key: &str) -> Result<Option<Identity>, AuthError> {
        let user = self.store.verify_api_key(api_key).await?;
        Ok(user.map(|u| u.identity()))
    }

    async fn get_user_info(&self, identity: &Identity) -> Result<UserInfo, AuthError> {
        let user = self
            .store
            .get_user_by_id(identity.user_id.value())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(UserInfo::from(user))
    }

    async fn change_password(
        &self,
        identity: &Identity,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if new_password.chars().count() < self.security.min_password_length {
            return Err(AuthError::Validation(format!(
                "New password must be at least {} characters",
                self.security.min_password_length
            )));
        }

        if current_password == new_password {
            return Err(AuthError::Validation(
                "New password must be different from current password".to_string(),
            ));
        }

        let is_valid = self
            .store
            .verify_user_password(&identity.username, current_password)
            .await?;

        if !is_valid {
            return Err(AuthError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        self.store
            .update_user_password(&identity.username, new_password, &self.security)
            .await?;

        Ok(())
    }

    async fn regenerate_api_key(&self, identity: &Identity) -> Result<String, AuthError> {
        let new_api_key = self
            .store
            .regenerate_user_api_key(&identity.username)
            .await?;

        Ok(new_api_key)
    }
}
