use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::Config;
use crate::db::Store;
use crate::generator::BatchRegistry;
use crate::services::{
    ActivityService, AuthService, DefaultGeneratorService, GeneratorService,
    SeaOrmActivityService, SeaOrmAuthService, SeaOrmUserService, UserService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub batches: BatchRegistry,

    pub auth_service: Arc<dyn AuthService>,

    pub user_service: Arc<dyn UserService>,

    pub generator_service: Arc<dyn GeneratorService>,

    pub activity_service: Arc<dyn ActivityService>,
}

impl SharedState {
    /// Connects the database, runs migrations, bootstraps the admin account
    /// and wires the services.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        store
            .ensure_bootstrap_admin(&config.bootstrap, &config.security)
            .await?;

        let batches = BatchRegistry::new(config.generator.batch_ttl());

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        let user_service = Arc::new(SeaOrmUserService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn UserService>;

        let generator_service = Arc::new(DefaultGeneratorService::new(
            store.clone(),
            batches.clone(),
            config.generator.options(),
        )) as Arc<dyn GeneratorService>;

        let activity_service =
            Arc::new(SeaOrmActivityService::new(store.clone())) as Arc<dyn ActivityService>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            batches,
            auth_service,
            user_service,
            generator_service,
            activity_service,
        })
    }

    /// Periodically drops parked batches whose inactivity window has passed.
    pub fn spawn_batch_sweeper(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let batches = self.batches.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let removed = batches.prune_expired().await;
                if removed > 0 {
                    debug!(removed, "Pruned expired batches");
                }
            }
        })
    }
}
