//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH};

/// User registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = MIN_USERNAME_LENGTH, max = MAX_USERNAME_LENGTH))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    #[validate(length(max = 100))]
    pub nickname: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Can be either name or email
    #[validate(length(min = 1))]
    pub identifier: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_limits() {
        let request = RegisterRequest {
            name: "al".to_string(),
            email: "alice@example.com".to_string(),
            password: "long enough".to_string(),
            nickname: None,
        };
        assert!(request.validate().is_err());

        let request = RegisterRequest {
            name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "short".to_string(),
            nickname: None,
        };
        assert!(request.validate().is_err());
    }
}
