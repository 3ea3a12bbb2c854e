use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::{BootstrapConfig, SecurityConfig};
use crate::models::activity::{ActivityEntry, ActivityPage, NewActivity};

pub mod migrator;
pub mod repositories;

pub use repositories::activity::ActivityScope;
pub use repositories::user::{NewUser, User, UserRepoError};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

/// Pool settings for `db_url`. An in-memory database lives only as long as
/// its single connection, so that connection is never recycled.
fn connect_options(
    db_url: &str,
    in_memory: bool,
    max_connections: u32,
    min_connections: u32,
) -> ConnectOptions {
    let mut opt = ConnectOptions::new(db_url.to_string());
    opt.connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    if in_memory {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600));
    }

    opt
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let opt = connect_options(db_url, in_memory, max_connections, min_connections);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn activity_repo(&self) -> repositories::activity::ActivityRepository {
        repositories::activity::ActivityRepository::new(self.conn.clone())
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Creates the configured administrator if no user with that name exists.
    /// Returns `true` when an account was created.
    pub async fn ensure_bootstrap_admin(
        &self,
        bootstrap: &BootstrapConfig,
        security: &SecurityConfig,
    ) -> Result<bool> {
        if !bootstrap.enabled {
            return Ok(false);
        }

        if self
            .user_repo()
            .get_by_username(&bootstrap.admin_username)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        self.user_repo()
            .create(
                NewUser {
                    username: bootstrap.admin_username.clone(),
                    email: bootstrap.admin_email.clone(),
                    password: bootstrap.admin_password.clone(),
                    is_admin: true,
                },
                security,
            )
            .await?;

        info!(
            "Default admin user created: {}",
            bootstrap.admin_username
        );
        Ok(true)
    }

    pub async fn create_user(
        &self,
        user: NewUser,
        security: &SecurityConfig,
    ) -> Result<User, UserRepoError> {
        self.user_repo().create(user, security).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn update_user_password(
        &self,
        username: &str,
        new_password: &str,
        security: &SecurityConfig,
    ) -> Result<()> {
        self.user_repo()
            .update_password(username, new_password, security)
            .await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn get_user_api_key(&self, username: &str) -> Result<Option<String>> {
        self.user_repo().get_api_key(username).await
    }

    pub async fn regenerate_user_api_key(&self, username: &str) -> Result<String> {
        self.user_repo().regenerate_api_key(username).await
    }

    // ------------------------------------------------------------------
    // Activity log
    // ------------------------------------------------------------------

    pub async fn record_activity(&self, activity: NewActivity) -> Result<ActivityEntry> {
        self.activity_repo().record(activity).await
    }

    pub async fn get_activity_page(
        &self,
        scope: ActivityScope,
        page: u64,
        per_page: u64,
    ) -> Result<ActivityPage> {
        self.activity_repo().page(scope, page, per_page).await
    }

    pub async fn get_all_activity(&self, scope: ActivityScope) -> Result<Vec<ActivityEntry>> {
        self.activity_repo().all(scope).await
    }

    pub async fn get_recent_activity(&self, limit: u64) -> Result<Vec<ActivityEntry>> {
        self.activity_repo().recent(limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_connection_is_never_recycled() {
        let opt = connect_options("sqlite::memory:", true, 5, 1);
        assert_eq!(opt.get_max_connections(), Some(1));
        assert_eq!(opt.get_min_connections(), Some(1));
        assert_eq!(opt.get_idle_timeout(), None);
        assert_eq!(opt.get_max_lifetime(), None);
    }

    #[test]
    fn test_file_pool_uses_configured_limits() {
        let opt = connect_options("sqlite:data/mikrogen.db?mode=rwc", false, 8, 2);
        assert_eq!(opt.get_max_connections(), Some(8));
        assert_eq!(opt.get_min_connections(), Some(2));
        assert_eq!(opt.get_idle_timeout(), Some(Duration::from_secs(300)));
        assert_eq!(opt.get_max_lifetime(), Some(Duration::from_secs(600)));
    }

    #[tokio::test]
    async fn test_in_memory_store_keeps_schema_across_queries() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        store
            .ensure_bootstrap_admin(
                &BootstrapConfig::default(),
                &SecurityConfig {
                    argon2_memory_cost_kib: 1024,
                    argon2_time_cost: 1,
                    ..SecurityConfig::default()
                },
            )
            .await
            .unwrap();

        for _ in 0..10 {
            store.ping().await.unwrap();
            assert!(store.get_user_by_username("admin").await.unwrap().is_some());
        }
    }
}
