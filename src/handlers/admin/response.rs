//! Admin response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::{AdminHackathonRel, Hackathon, UserHackathonRel};

/// Hackathons the current user may administer
#[derive(Debug, Serialize)]
pub struct PermittedHackathonsResponse {
    pub hackathons: Vec<Hackathon>,
}

/// Hackathon creation result
#[derive(Debug, Serialize)]
pub struct CreateHackathonResponse {
    pub id: Uuid,
}

/// Registrations of the current hackathon
#[derive(Debug, Serialize)]
pub struct RegistrationsListResponse {
    pub registrations: Vec<UserHackathonRel>,
}

/// Administrators of the current hackathon
#[derive(Debug, Serialize)]
pub struct AdminsListResponse {
    pub administrators: Vec<AdminHackathonRel>,
}

/// One uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileResponse {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: u64,
    pub thumbnail_url: String,
    pub delete_url: String,
}

/// Result of a multipart upload
#[derive(Debug, Serialize)]
pub struct UploadFilesResponse {
    pub files: Vec<UploadedFileResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_file_uses_camel_case_keys() {
        let file = UploadedFileResponse {
            name: "spring/abc.png".to_string(),
            url: "https://acct.blob.core.windows.net/images/spring/abc.png".to_string(),
            file_type: "image".to_string(),
            size: 42,
            thumbnail_url: "https://acct.blob.core.windows.net/images/spring/abc.png".to_string(),
            delete_url: "/api/file?key=spring/abc.png".to_string(),
        };

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["thumbnailUrl"], json["url"]);
        assert_eq!(json["deleteUrl"], "/api/file?key=spring/abc.png");
        assert_eq!(json["size"], 42);
    }
}
