//! Cloud service response DTOs

use serde::Serialize;

/// Existence check result
#[derive(Debug, Serialize)]
pub struct CloudServiceExistsResponse {
    pub name: String,
    pub exists: bool,
}

/// Create result
#[derive(Debug, Serialize)]
pub struct CloudServiceCreatedResponse {
    pub name: String,
    pub created: bool,
}

/// Update result
#[derive(Debug, Serialize)]
pub struct CloudServiceUpdatedResponse {
    pub name: String,
    pub updated: bool,
}

/// Delete result
#[derive(Debug, Serialize)]
pub struct CloudServiceDeletedResponse {
    pub name: String,
    pub deleted: bool,
}
