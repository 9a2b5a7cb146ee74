//! Cloud service handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;
use validator::Validate;

use crate::{
    azure::{CloudServiceAdapter, management::CreateHostedServiceExtra},
    error::{AppResult, bad_request, internal_server_error},
    state::AppState,
    utils::validate_cloud_service_name,
};

use super::{
    request::{CreateCloudServiceRequest, UpdateCloudServiceRequest},
    response::{
        CloudServiceCreatedResponse, CloudServiceDeletedResponse, CloudServiceExistsResponse,
        CloudServiceUpdatedResponse,
    },
};

fn adapter(state: &AppState) -> AppResult<&CloudServiceAdapter> {
    state
        .cloud_services()
        .ok_or_else(|| internal_server_error("cloud service management is not configured"))
}

/// Reject names that are not a plain hosted service name
fn checked_name(name: String) -> AppResult<String> {
    validate_cloud_service_name(&name).map_err(bad_request)?;
    Ok(name)
}

/// Whether a hosted service exists
pub async fn get_cloud_service(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<CloudServiceExistsResponse>> {
    let name = checked_name(name)?;
    let exists = adapter(&state)?.cloud_service_exists(&name).await?;

    Ok(Json(CloudServiceExistsResponse { name, exists }))
}

/// Create a hosted service and wait for the provider
pub async fn create_cloud_service(
    State(state): State<AppState>,
    Json(payload): Json<CreateCloudServiceRequest>,
) -> AppResult<Json<CloudServiceCreatedResponse>> {
    payload.validate()?;
    let name = checked_name(payload.name)?;

    let extra = CreateHostedServiceExtra {
        description: payload.description,
        affinity_group: payload.affinity_group,
        extended_properties: payload.extended_properties.into_iter().collect(),
    };
    let created = adapter(&state)?
        .create_cloud_service(&name, &payload.label, &payload.location, extra)
        .await?;

    info!(service = %name, created, "create cloud service finished");
    Ok(Json(CloudServiceCreatedResponse { name, created }))
}

/// Update label and/or description of a hosted service
pub async fn update_cloud_service(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<UpdateCloudServiceRequest>,
) -> AppResult<Json<CloudServiceUpdatedResponse>> {
    let name = checked_name(name)?;
    payload.validate()?;
    if payload.label.is_none() && payload.description.is_none() {
        return Err(bad_request("label or description required"));
    }

    let updated = adapter(&state)?
        .update_cloud_service(&name, payload.label.as_deref(), payload.description.as_deref())
        .await?;

    info!(service = %name, updated, "update cloud service finished");
    Ok(Json(CloudServiceUpdatedResponse { name, updated }))
}

/// Delete a hosted service
pub async fn delete_cloud_service(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<CloudServiceDeletedResponse>> {
    let name = checked_name(name)?;
    let deleted = adapter(&state)?.delete_cloud_service(&name).await?;

    info!(service = %name, deleted, "delete cloud service finished");
    Ok(Json(CloudServiceDeletedResponse { name, deleted }))
}
