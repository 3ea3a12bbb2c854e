//! Read side of the activity log: paging and export.
//!
//! Admins see every record; everyone else sees only their own. The same rule
//! applies to the CSV and the spreadsheet export.

use thiserror::Error;

use crate::db::ActivityScope;
use crate::domain::Identity;
use crate::export::{ExportError, ExportFile, ExportFormat};
use crate::models::activity::ActivityPage;

pub const ACTIVITY_PAGE_SIZE: u64 = 20;

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for ActivityError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[must_use]
pub const fn scope_for(identity: &Identity) -> ActivityScope {
    if identity.is_admin {
        ActivityScope::All
    } else {
        ActivityScope::User(identity.user_id.value())
    }
}

#[async_trait::async_trait]
pub trait ActivityService: Send + Sync {
    /// One page (1-based) of the records visible to `identity`, newest first.
    async fn list(&self, identity: &Identity, page: u64) -> Result<ActivityPage, ActivityError>;

    async fn export(
        &self,
        identity: &Identity,
        format: ExportFormat,
    ) -> Result<ExportFile, ActivityError>;
}
