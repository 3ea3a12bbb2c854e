use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::validate_user_id;
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::domain::Identity;
use crate::services::{AdminOverview, CreateUserRequest, UserError, UserInfo};

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Forbidden => Self::forbidden(err.to_string()),
            UserError::Validation(msg) => Self::validation(msg),
            UserError::Conflict(msg) => Self::Conflict(msg),
            UserError::NotFound => Self::NotFound(err.to_string()),
            UserError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /admin/overview
pub async fn overview(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ApiResponse<AdminOverview>>, ApiError> {
    let overview = state.user_service().overview(&identity).await?;
    Ok(Json(ApiResponse::success(overview)))
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ApiResponse<Vec<UserInfo>>>, ApiError> {
    let users = state.user_service().list_users(&identity).await?;
    Ok(Json(ApiResponse::success(users)))
}

/// POST /admin/users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = state
        .user_service()
        .create_user(&identity, payload)
        .await?;
    Ok(Json(ApiResponse::success(user)))
}

/// DELETE /admin/users/{id}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_user_id(id)?;
    state.user_service().delete_user(&identity, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "User deleted successfully.",
    ))))
}
