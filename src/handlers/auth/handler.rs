//! Authentication handler implementations

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::AuthService,
    state::AppState,
};

use super::{
    request::{LoginRequest, RegisterRequest},
    response::{AuthResponse, MessageResponse, RegisterResponse},
};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    payload.validate()?;

    let user = AuthService::register(
        state.db(),
        &payload.name,
        &payload.email,
        &payload.password,
        payload.nickname.as_deref(),
    )
    .await?;

    let response = RegisterResponse {
        message: "User registered successfully".to_string(),
        user: user.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with name/email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let (user, access_token, expires_in) = AuthService::login(
        state.db(),
        &state.config().jwt,
        &payload.identifier,
        &payload.password,
    )
    .await?;

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in,
        user: user.into(),
    }))
}

/// Logout (marks the user offline)
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<MessageResponse>> {
    AuthService::logout(state.db(), &auth_user.id).await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}
