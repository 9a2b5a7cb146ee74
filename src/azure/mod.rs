//! Cloud provider clients
//!
//! Thin REST clients for the two cloud surfaces the server uses:
//! - **management**: classic service management API (hosted services, async operations)
//! - **cloud_service**: synchronous wrapper over the management client
//! - **blob**: blob storage for uploaded images

pub mod blob;
pub mod cloud_service;
pub mod management;

pub use blob::{AzureBlobStore, BlobStore};
pub use cloud_service::CloudServiceAdapter;
pub use management::{ServiceManagement, ServiceManagementClient};

#[cfg(test)]
pub use blob::MockBlobStore;
#[cfg(test)]
pub use management::MockServiceManagement;

use reqwest::{Response, StatusCode};
use serde::Deserialize;

/// Errors raised by the cloud clients
#[derive(Debug, thiserror::Error)]
pub enum AzureError {
    /// The provider answered 404 for the named resource
    #[error("Resource not found: {0}")]
    MissingResource(String),

    /// The provider rejected the request
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Deserialize(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AzureError {
    /// Whether the provider itself answered with an error status
    pub fn is_http_error(&self) -> bool {
        matches!(self, Self::MissingResource(_) | Self::Http { .. })
    }
}

/// Error document returned by both management and storage endpoints
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "Code", default)]
    code: Option<String>,
    #[serde(rename = "Message", default)]
    message: Option<String>,
}

/// Pass a successful response through, map anything else to an [`AzureError`]
async fn check_response(response: Response, resource: &str) -> Result<Response, AzureError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        return Err(AzureError::MissingResource(resource.to_string()));
    }

    Err(AzureError::Http {
        status: status.as_u16(),
        message: error_message(&body, status),
    })
}

fn error_message(body: &str, status: StatusCode) -> String {
    match quick_xml::de::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            code: Some(code),
            message: Some(message),
        }) => format!("{}: {}", code, message),
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_xml_body() {
        let body = r#"<Error xmlns="http://schemas.microsoft.com/windowsazure"><Code>ConflictError</Code><Message>The specified DNS name is already taken.</Message></Error>"#;
        assert_eq!(
            error_message(body, StatusCode::CONFLICT),
            "ConflictError: The specified DNS name is already taken."
        );
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        assert_eq!(error_message("", StatusCode::BAD_REQUEST), "Bad Request");
    }

    #[test]
    fn test_http_error_classification() {
        assert!(AzureError::MissingResource("x".to_string()).is_http_error());
        assert!(
            AzureError::Http {
                status: 409,
                message: "conflict".to_string()
            }
            .is_http_error()
        );
        assert!(!AzureError::Deserialize("bad".to_string()).is_http_error());
    }
}
