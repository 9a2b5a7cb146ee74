//! Admin request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::constants::{
    MAX_HACKATHON_DESCRIPTION_LENGTH, MAX_HACKATHON_DISPLAY_NAME_LENGTH, MAX_HACKATHON_NAME_LENGTH,
};

/// Create hackathon request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateHackathonRequest {
    /// Unique name, also used in the `hackathon_name` header
    #[validate(length(min = 1, max = MAX_HACKATHON_NAME_LENGTH))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = MAX_HACKATHON_DISPLAY_NAME_LENGTH))]
    pub display_name: Option<String>,

    #[validate(length(max = MAX_HACKATHON_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    /// 0 draft, 1 online, 2 offline
    #[validate(range(min = 0, max = 2))]
    pub status: Option<i32>,

    pub basic_info: Option<Value>,
    pub extra_info: Option<Value>,
    pub event_start_time: Option<DateTime<Utc>>,
    pub event_end_time: Option<DateTime<Utc>>,
}

/// Update hackathon request
///
/// `name` selects the hackathon and `id` must match it; the other fields are
/// written only when they differ from the stored record.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateHackathonRequest {
    pub id: Option<Uuid>,
    pub name: Option<String>,

    #[validate(length(min = 1, max = MAX_HACKATHON_DISPLAY_NAME_LENGTH))]
    pub display_name: Option<String>,

    #[validate(length(max = MAX_HACKATHON_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[validate(range(min = 0, max = 2))]
    pub status: Option<i32>,

    pub basic_info: Option<Value>,
    pub extra_info: Option<Value>,
    pub event_start_time: Option<DateTime<Utc>>,
    pub event_end_time: Option<DateTime<Utc>>,
}

/// Audit a registration
#[derive(Debug, Deserialize, Validate)]
pub struct AuditRegistrationRequest {
    /// 0 unaudited, 1 audit passed, 2 audit refused, 3 auto passed
    #[validate(range(min = 0, max = 3))]
    pub status: i32,
}

/// Grant a user admin rights on the current hackathon
#[derive(Debug, Deserialize, Validate)]
pub struct AddAdminRequest {
    pub user_id: Uuid,

    /// 1 admin, 2 judge
    #[validate(range(min = 1, max = 2))]
    pub role_type: Option<i32>,

    #[validate(length(max = 255))]
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_rejects_out_of_range_status() {
        let request = CreateHackathonRequest {
            name: Some("spring".to_string()),
            status: Some(7),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_allows_missing_name() {
        // A missing name is reported by the service with its own message
        let request = CreateHackathonRequest::default();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_deserializes_partial_body() {
        let request: UpdateHackathonRequest = serde_json::from_str(
            r#"{"id":"6f1c0d1e-3a7b-4c59-9c1a-2f6a2b9d8e10","name":"spring","description":"new"}"#,
        )
        .unwrap();
        assert_eq!(request.name.as_deref(), Some("spring"));
        assert_eq!(request.description.as_deref(), Some("new"));
        assert!(request.display_name.is_none());
    }
}
