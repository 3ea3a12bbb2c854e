use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{parse_batch_handle, parse_export_format};
use super::{ApiError, ApiResponse, AppState, attachment};
use crate::domain::Identity;
use crate::export::ExportFormat;
use crate::generator::GenerateRequest;
use crate::services::{GeneratedBatch, GeneratorError};

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

impl From<GeneratorError> for ApiError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::Validation(e) => Self::validation(e.to_string()),
            GeneratorError::BatchNotFound => Self::NotFound(err.to_string()),
            GeneratorError::Export(e) => e.into(),
            GeneratorError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// POST /generator
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<ApiResponse<GeneratedBatch>>, ApiError> {
    let batch = state
        .generator_service()
        .generate(&identity, request)
        .await?;

    Ok(Json(ApiResponse::success(batch)))
}

/// GET /generator/batches/{handle}/export?format=xlsx|csv
pub async fn export_batch(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(handle): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let handle = parse_batch_handle(&handle)?;
    let format = parse_export_format(query.format.as_deref(), ExportFormat::Xlsx)?;

    let file = state
        .generator_service()
        .export_batch(&identity, handle, format)
        .await?;

    attachment(file)
}
