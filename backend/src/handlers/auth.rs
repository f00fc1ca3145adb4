//! HTTP handlers for authentication endpoints

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::auth::{AuthService, AuthTokens, RegisterFarmerInput, RegisterResponse};
use crate::AppState;

/// Register a new farmer account
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterFarmerInput>,
) -> AppResult<Json<RegisterResponse>> {
    let service = AuthService::new(state.db, &state.config);
    let response = service.register_farmer(input).await?;
    Ok(Json(response))
}

/// Login credentials
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub phone: String,
    pub password: String,
}

/// Authenticate with phone and password
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<AuthTokens>> {
    let service = AuthService::new(state.db, &state.config);
    let tokens = service.login(&input.phone, &input.password).await?;
    Ok(Json(tokens))
}

/// Refresh token input
#[derive(Debug, Deserialize)]
pub struct RefreshInput {
    pub refresh_token: String,
}

/// Exchange a refresh token for new tokens
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshInput>,
) -> AppResult<Json<AuthTokens>> {
    let service = AuthService::new(state.db, &state.config);
    let tokens = service.refresh_token(&input.refresh_token).await?;
    Ok(Json(tokens))
}
