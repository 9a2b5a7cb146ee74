//! User handler implementations

use axum::{Json, extract::State};

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::{HackathonService, UserService},
    state::AppState,
};

use super::response::{CurrentUserResponse, UserHackathonsResponse};

/// Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<CurrentUserResponse>> {
    let user = UserService::get_user_by_id(state.db(), &auth_user.id).await?;

    Ok(Json(CurrentUserResponse { user: user.into() }))
}

/// Hackathons the current user registered for
pub async fn get_user_hackathons(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UserHackathonsResponse>> {
    let hackathons = HackathonService::get_user_hackathon_list(state.db(), &auth_user.id).await?;

    Ok(Json(UserHackathonsResponse { hackathons }))
}
