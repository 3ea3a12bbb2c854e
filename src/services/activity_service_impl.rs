use async_trait::async_trait;
use chrono::Utc;

use crate::db::{ActivityScope, Store};
use crate::domain::Identity;
use crate::export::{self, ExportFile, ExportFormat};
use crate::models::activity::ActivityPage;
use crate::services::activity_service::{
    ACTIVITY_PAGE_SIZE, ActivityError, ActivityService, scope_for,
};

pub struct SeaOrmActivityService {
    store: Store,
}

impl SeaOrmActivityService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Renders every record in `scope`. Used by the CLI, which has no caller identity.
    pub async fn export_scope(
        &self,
        scope: ActivityScope,
        format: ExportFormat,
    ) -> Result<ExportFile, ActivityError> {
        let entries = self.store.get_all_activity(scope).await?;
        let file = export::export_activity(&entries, format, Utc::now().naive_utc())?;

        metrics::counter!("mikrogen_exports_total", "kind" => "activity", "format" => format.extension())
            .increment(1);

        Ok(file)
    }
}

#[async_trait]
impl ActivityService for SeaOrmActivityService {
    async fn list(&self, identity: &Identity, page: u64) -> Result<ActivityPage, ActivityError> {
        let page = self
            .store
            .get_activity_page(scope_for(identity), page, ACTIVITY_PAGE_SIZE)
            .await?;
        Ok(page)
    }

    async fn export(
        &self,
        identity: &Identity,
        format: ExportFormat,
    ) -> Result<ExportFile, ActivityError> {
        self.export_scope(scope_for(identity), format).await
    }
}
