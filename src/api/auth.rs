use axum::{
    Extension, Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::domain::Identity;
use crate::services::{AuthError, LoginResult, UserInfo};

/// Session key holding the logged-in user's id.
pub const SESSION_USER_KEY: &str = "user_id";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct ApiKeyResponse {
    pub api_key: String,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::unauthorized(err.to_string()),
            AuthError::UserNotFound => Self::unauthorized("Not authenticated"),
            AuthError::Validation(msg) => Self::validation(msg),
            AuthError::Internal(msg) => Self::internal(msg),
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the caller's [`Identity`] and stores it in the request extensions,
/// and in the response extensions on the way out.
///
/// Checked in order:
/// 1. Session cookie (from login)
/// 2. `X-Api-Key` header
/// 3. `Authorization: Bearer <api_key>` header
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let mut identity = None;

    if let Ok(Some(user_id)) = session.get::<i32>(SESSION_USER_KEY).await {
        identity = state.auth_service().identity_for_user(user_id).await?;
        if identity.is_none() {
            // Account was deleted while the session was alive.
            let _ = session.flush().await;
        }
    }

    if identity.is_none()
        && let Some(key) = extract_api_key(&headers)
    {
        identity = state.auth_service().identity_for_api_key(&key).await?;
    }

    let Some(identity) = identity else {
        return Err(ApiError::unauthorized("Unauthorized"));
    };

    request.extensions_mut().insert(identity.clone());
    let mut response = next.run(request).await;
    // Lets the outer request logger name the caller.
    response.extensions_mut().insert(identity);
    Ok(response)
}

fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
/// Authenticate with username and password, returns API key on success
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let result = state
        .auth_service()
        .login(&payload.username, &payload.password)
        .await
        .inspect_err(|_| {
            tracing::warn!(username = %payload.username, "Failed login attempt");
        })?;

    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;
    session
        .insert(SESSION_USER_KEY, result.user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    tracing::info!(username = %result.user.username, "User logged in");

    Ok(Json(ApiResponse::success(result)))
}

/// POST /auth/logout
/// Invalidate the current session
pub async fn logout(session: Session) -> Json<ApiResponse<MessageResponse>> {
    let _ = session.flush().await;
    Json(ApiResponse::success(MessageResponse::new(
        "You have been logged out.",
    )))
}

/// GET /auth/me
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = state.auth_service().get_user_info(&identity).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /auth/password
/// Change password (requires current password verification)
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .auth_service()
        .change_password(&identity, &payload.current_password, &payload.new_password)
        .await?;

    tracing::info!("Password changed for user: {}", identity.username);

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password updated successfully",
    ))))
}

/// POST /auth/api-key/regenerate
/// Generate a new random API key
pub async fn regenerate_api_key(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ApiResponse<ApiKeyResponse>>, ApiError> {
    let api_key = state.auth_service().regenerate_api_key(&identity).await?;

    tracing::info!("API key regenerated for user: {}", identity.username);

    Ok(Json(ApiResponse::success(ApiKeyResponse { api_key })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_api_key_prefers_header() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Api-Key", HeaderValue::from_static("abc"));
        headers.insert("Authorization", HeaderValue::from_static("Bearer xyz"));
        assert_eq!(extract_api_key(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_extract_api_key_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer  xyz "));
        assert_eq!(extract_api_key(&headers).as_deref(), Some("xyz"));

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Basic xyz"));
        assert_eq!(extract_api_key(&headers), None);
    }
}
