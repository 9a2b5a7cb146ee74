//! Hackathon handler implementations

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::{AuthenticatedUser, CurrentHackathon, OptionalAuth},
    models::{Hackathon, UserHackathonRel},
    services::HackathonService,
    state::AppState,
};

use super::{
    request::{ListHackathonsQuery, RegistrationRequest},
    response::{HackathonStat, HackathonsListResponse},
};

/// List hackathons, with the caller's registrations when logged in
pub async fn list_hackathons(
    State(state): State<AppState>,
    OptionalAuth(auth_user): OptionalAuth,
    Query(query): Query<ListHackathonsQuery>,
) -> AppResult<Json<HackathonsListResponse>> {
    let hackathons = HackathonService::get_hackathon_list(
        state.db(),
        auth_user.as_ref().map(|u| &u.id),
        query.status,
    )
    .await?;

    Ok(Json(HackathonsListResponse { hackathons }))
}

/// The hackathon named by the request header
pub async fn get_hackathon(CurrentHackathon(hackathon): CurrentHackathon) -> Json<Hackathon> {
    Json(hackathon)
}

/// Participant counts of the current hackathon
pub async fn get_hackathon_stat(
    State(state): State<AppState>,
    CurrentHackathon(hackathon): CurrentHackathon,
) -> AppResult<Json<HackathonStat>> {
    let stat = HackathonService::get_hackathon_stat(state.db(), &hackathon).await?;
    Ok(Json(stat))
}

/// Register the caller for the current hackathon
pub async fn register_for_hackathon(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    CurrentHackathon(hackathon): CurrentHackathon,
    Json(payload): Json<RegistrationRequest>,
) -> AppResult<(StatusCode, Json<UserHackathonRel>)> {
    payload.validate()?;

    let rel =
        HackathonService::register_for_hackathon(state.db(), &auth_user.id, &hackathon, &payload).await?;

    Ok((StatusCode::CREATED, Json(rel)))
}
