//! Cloud service request DTOs

use std::collections::BTreeMap;

use serde::Deserialize;
use validator::Validate;

/// Create a hosted service
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCloudServiceRequest {
    #[validate(length(min = 3, max = 63))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub label: String,

    /// Region, e.g. "East US"; ignored when an affinity group is given
    #[validate(length(min = 1))]
    pub location: String,

    #[validate(length(max = 1024))]
    pub description: Option<String>,

    pub affinity_group: Option<String>,

    /// Free-form name/value pairs stored with the service
    #[serde(default)]
    pub extended_properties: BTreeMap<String, String>,
}

/// Update label and/or description of a hosted service
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCloudServiceRequest {
    #[validate(length(min = 1, max = 100))]
    pub label: Option<String>,

    #[validate(length(max = 1024))]
    pub description: Option<String>,
}
