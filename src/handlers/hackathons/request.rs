//! Hackathon request DTOs

use serde::Deserialize;
use validator::Validate;

/// List hackathons query parameters
#[derive(Debug, Deserialize)]
pub struct ListHackathonsQuery {
    /// 0 draft, 1 online, 2 offline
    pub status: Option<i32>,
}

/// Register for the current hackathon
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[validate(length(min = 1, max = 64))]
    pub real_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 3, max = 32))]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_request_validates_email() {
        let request = RegistrationRequest {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = RegistrationRequest {
            real_name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: None,
        };
        assert!(request.validate().is_ok());
    }
}
