//! Handler for `POST /login`.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::accounts::verify_credentials;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
}

/// POST /login
///
/// Succeeds with a message only; no session or token is issued.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if !verify_credentials(&state.pool, &input.username, &input.password).await? {
        tracing::info!(username = %input.username, "Rejected login attempt");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(username = %input.username, "Login successful");
    Ok(Json(LoginResponse {
        message: "Login successful",
    }))
}
