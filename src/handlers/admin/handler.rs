//! Admin handler implementations

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode, header::CONTENT_LENGTH},
};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppResult, access_denied},
    handlers::auth::response::MessageResponse,
    middleware::{AuthenticatedUser, CurrentHackathon},
    models::{AdminHackathonRel, UserHackathonRel},
    services::{HackathonService, UploadFile},
    state::AppState,
};

use super::{
    request::{AddAdminRequest, AuditRegistrationRequest, CreateHackathonRequest, UpdateHackathonRequest},
    response::{
        AdminsListResponse, CreateHackathonResponse, PermittedHackathonsResponse,
        RegistrationsListResponse, UploadFilesResponse,
    },
};

/// Hackathons the caller may administer
pub async fn list_permitted_hackathons(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<PermittedHackathonsResponse>> {
    let hackathons =
        HackathonService::get_permitted_hackathon_list_by_admin_user_id(state.db(), &auth_user.id).await?;

    Ok(Json(PermittedHackathonsResponse { hackathons }))
}

/// Create a hackathon owned by the caller
pub async fn create_hackathon(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateHackathonRequest>,
) -> AppResult<(StatusCode, Json<CreateHackathonResponse>)> {
    payload.validate()?;

    let id = HackathonService::create_new_hackathon(state.db(), &auth_user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(CreateHackathonResponse { id })))
}

/// Update the current hackathon
pub async fn update_hackathon(
    State(state): State<AppState>,
    CurrentHackathon(hackathon): CurrentHackathon,
    Json(payload): Json<UpdateHackathonRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    // Privilege was checked against the header hackathon only
    if payload.name.as_deref().is_some_and(|name| name != hackathon.name) {
        return Err(access_denied("access denied"));
    }

    HackathonService::update_hackathon(state.db(), &payload).await?;

    Ok(Json(MessageResponse::new("update hackathon succeed")))
}

// =============================================================================
// Registrations
// =============================================================================

pub async fn list_registrations(
    State(state): State<AppState>,
    CurrentHackathon(hackathon): CurrentHackathon,
) -> AppResult<Json<RegistrationsListResponse>> {
    let registrations = HackathonService::list_registrations(state.db(), &hackathon).await?;

    Ok(Json(RegistrationsListResponse { registrations }))
}

pub async fn audit_registration(
    State(state): State<AppState>,
    CurrentHackathon(hackathon): CurrentHackathon,
    Path(id): Path<Uuid>,
    Json(payload): Json<AuditRegistrationRequest>,
) -> AppResult<Json<UserHackathonRel>> {
    payload.validate()?;

    let rel = HackathonService::audit_registration(state.db(), &hackathon, &id, payload.status).await?;

    Ok(Json(rel))
}

pub async fn delete_registration(
    State(state): State<AppState>,
    CurrentHackathon(hackathon): CurrentHackathon,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    HackathonService::delete_registration(state.db(), &hackathon, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Administrators
// =============================================================================

pub async fn list_admins(
    State(state): State<AppState>,
    CurrentHackathon(hackathon): CurrentHackathon,
) -> AppResult<Json<AdminsListResponse>> {
    let administrators = HackathonService::list_admins(state.db(), &hackathon).await?;

    Ok(Json(AdminsListResponse { administrators }))
}

pub async fn add_admin(
    State(state): State<AppState>,
    CurrentHackathon(hackathon): CurrentHackathon,
    Json(payload): Json<AddAdminRequest>,
) -> AppResult<(StatusCode, Json<AdminHackathonRel>)> {
    payload.validate()?;

    let rel = HackathonService::add_admin(state.db(), &hackathon, &payload).await?;

    Ok((StatusCode::CREATED, Json(rel)))
}

pub async fn remove_admin(
    State(state): State<AppState>,
    CurrentHackathon(hackathon): CurrentHackathon,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    HackathonService::remove_admin(state.db(), &hackathon, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Files
// =============================================================================

/// Upload images for the current hackathon
pub async fn upload_files(
    State(state): State<AppState>,
    CurrentHackathon(hackathon): CurrentHackathon,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<Json<UploadFilesResponse>> {
    let content_length = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            debug!(field = ?field.name(), "skipping non-file multipart field");
            continue;
        };
        let data = field.bytes().await?;
        files.push(UploadFile {
            file_name: Some(file_name),
            data: data.to_vec(),
        });
    }

    let files = HackathonService::upload_files(
        state.blob_store(),
        &state.config().storage,
        &hackathon,
        files,
        content_length,
    )
    .await?;

    Ok(Json(UploadFilesResponse { files }))
}
