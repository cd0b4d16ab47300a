//! Axum route handlers for registration and login.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub username: String,
    pub registered: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub authenticated: bool,
}

impl CredentialsRequest {
    /// Trimmed username; both fields must be non-blank.
    fn validated(&self) -> Result<&str, AppError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("username cannot be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("password cannot be empty".to_string()));
        }
        Ok(username)
    }
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let username = request.validated()?;

    if !state.credentials.register(username, &request.password).await? {
        return Err(AppError::Conflict(format!("Username '{username}' is already taken")));
    }

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: username.to_string(),
            registered: true,
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = request.validated()?;

    if !state.credentials.authenticate(username, &request.password).await? {
        return Err(AppError::Unauthorized);
    }

    info!("User '{username}' logged in");
    Ok(Json(LoginResponse {
        username: username.to_string(),
        authenticated: true,
    }))
}
