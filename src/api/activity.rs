use axum::{
    Extension, Json,
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use super::generator::ExportQuery;
use super::validation::{parse_export_format, validate_page};
use super::{ApiError, ApiResponse, AppState, attachment};
use crate::domain::Identity;
use crate::export::ExportFormat;
use crate::models::activity::ActivityPage;
use crate::services::ActivityError;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub page: Option<u64>,
}

impl From<ActivityError> for ApiError {
    fn from(err: ActivityError) -> Self {
        match err {
            ActivityError::Export(e) => e.into(),
            ActivityError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /activity?page=N
pub async fn list_activity(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ApiResponse<ActivityPage>>, ApiError> {
    let page = validate_page(query.page)?;
    let page = state.activity_service().list(&identity, page).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// GET /activity/export?format=csv|xlsx
pub async fn export_activity(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let format = parse_export_format(query.format.as_deref(), ExportFormat::Csv)?;
    let file = state.activity_service().export(&identity, format).await?;
    attachment(file)
}
