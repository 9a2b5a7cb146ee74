//! Classic service management client
//!
//! Covers the hosted service calls and asynchronous operation lookup used by
//! [`CloudServiceAdapter`](super::CloudServiceAdapter). Requests are
//! authenticated with the subscription's management certificate.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::{Client, Identity, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};

use super::{AzureError, check_response};
use crate::config::AzureConfig;
use crate::constants::MANAGEMENT_API_VERSION;

const XMLNS: &str = "http://schemas.microsoft.com/windowsazure";
const REQUEST_ID_HEADER: &str = "x-ms-request-id";

/// Hosted service as returned by the properties call
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HostedService {
    #[serde(rename = "Url", default)]
    pub url: Option<String>,
    #[serde(rename = "ServiceName")]
    pub service_name: String,
    #[serde(rename = "HostedServiceProperties", default)]
    pub properties: Option<HostedServiceProperties>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HostedServiceProperties {
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Location", default)]
    pub location: Option<String>,
    #[serde(rename = "AffinityGroup", default)]
    pub affinity_group: Option<String>,
    /// Base64 encoded, see [`HostedServiceProperties::decoded_label`]
    #[serde(rename = "Label", default)]
    pub label: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}

impl HostedServiceProperties {
    pub fn decoded_label(&self) -> Option<String> {
        let raw = self.label.as_deref()?;
        BASE64
            .decode(raw)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }
}

/// Optional settings for a new hosted service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateHostedServiceExtra {
    pub description: Option<String>,
    pub affinity_group: Option<String>,
    pub extended_properties: Vec<(String, String)>,
}

/// Body of the create hosted service call
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename = "CreateHostedService")]
pub struct CreateHostedService {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "ServiceName")]
    pub service_name: String,
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Location", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "AffinityGroup", skip_serializing_if = "Option::is_none")]
    pub affinity_group: Option<String>,
    #[serde(rename = "ExtendedProperties", skip_serializing_if = "Option::is_none")]
    pub extended_properties: Option<ExtendedProperties>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExtendedProperties {
    #[serde(rename = "ExtendedProperty")]
    pub items: Vec<ExtendedProperty>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExtendedProperty {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl CreateHostedService {
    /// Build the request; the label is base64 encoded as the API expects
    pub fn new(name: &str, label: &str, location: &str, extra: CreateHostedServiceExtra) -> Self {
        let extended_properties = if extra.extended_properties.is_empty() {
            None
        } else {
            Some(ExtendedProperties {
                items: extra
                    .extended_properties
                    .into_iter()
                    .map(|(name, value)| ExtendedProperty { name, value })
                    .collect(),
            })
        };

        Self {
            xmlns: XMLNS,
            service_name: name.to_string(),
            label: BASE64.encode(label),
            description: extra.description,
            // Location and affinity group are mutually exclusive
            location: if extra.affinity_group.is_some() {
                None
            } else {
                Some(location.to_string())
            },
            affinity_group: extra.affinity_group,
            extended_properties,
        }
    }
}

/// Body of the update hosted service call
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename = "UpdateHostedService")]
pub struct UpdateHostedService {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "Label", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateHostedService {
    pub fn new(label: Option<&str>, description: Option<&str>) -> Self {
        Self {
            xmlns: XMLNS,
            label: label.map(|l| BASE64.encode(l)),
            description: description.map(str::to_string),
        }
    }
}

/// Status of an asynchronous operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum OperationStatus {
    InProgress,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OperationError {
    #[serde(rename = "Code", default)]
    pub code: Option<String>,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
}

/// Asynchronous operation as reported by the operation status call
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Operation {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Status")]
    pub status: OperationStatus,
    #[serde(rename = "HttpStatusCode", default)]
    pub http_status_code: Option<u16>,
    #[serde(rename = "Error", default)]
    pub error: Option<OperationError>,
}

/// The service management surface the adapter relies on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceManagement: Send + Sync {
    /// Properties of a hosted service; `MissingResource` when it does not exist
    async fn get_hosted_service_properties(&self, name: &str) -> Result<HostedService, AzureError>;

    /// Start creating a hosted service, returning the request id
    async fn create_hosted_service(&self, request: &CreateHostedService) -> Result<String, AzureError>;

    /// Update label/description of a hosted service, returning the request id
    async fn update_hosted_service(
        &self,
        name: &str,
        request: &UpdateHostedService,
    ) -> Result<String, AzureError>;

    /// Delete a hosted service, returning the request id
    async fn delete_hosted_service(&self, name: &str) -> Result<String, AzureError>;

    /// Current status of an asynchronous operation
    async fn get_operation_status(&self, request_id: &str) -> Result<Operation, AzureError>;
}

/// REST implementation of [`ServiceManagement`]
#[derive(Debug, Clone)]
pub struct ServiceManagementClient {
    http: Client,
    endpoint: String,
    subscription_id: String,
}

impl ServiceManagementClient {
    /// Create a client; `identity` carries the management certificate
    pub fn new(
        subscription_id: &str,
        endpoint: &str,
        identity: Option<Identity>,
    ) -> Result<Self, AzureError> {
        let mut builder = Client::builder().use_rustls_tls();
        if let Some(identity) = identity {
            builder = builder.identity(identity);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            subscription_id: subscription_id.to_string(),
        })
    }

    /// Build a client from configuration, `None` when no subscription is set
    pub async fn from_config(config: &AzureConfig) -> Result<Option<Self>, AzureError> {
        let Some(subscription_id) = config.subscription_id.as_deref() else {
            return Ok(None);
        };

        let cert_path = config.cert_path.as_ref().ok_or_else(|| {
            AzureError::Configuration("AZURE_CERT_PATH is required with a subscription".to_string())
        })?;
        let pem = tokio::fs::read(cert_path).await.map_err(|e| {
            AzureError::Configuration(format!("cannot read {}: {}", cert_path.display(), e))
        })?;
        let identity = Identity::from_pem(&pem)?;

        Self::new(subscription_id, &config.management_endpoint, Some(identity)).map(Some)
    }

    /// Each segment is percent-encoded, so a name cannot leave its resource path
    fn url(&self, segments: &[&str]) -> Result<Url, AzureError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| AzureError::Configuration(format!("invalid management endpoint: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AzureError::Configuration("management endpoint cannot be a base".to_string()))?
            .pop_if_empty()
            .push(&self.subscription_id)
            .extend(segments);
        Ok(url)
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("x-ms-version", MANAGEMENT_API_VERSION)
    }

    fn xml_body<T: Serialize>(body: &T) -> Result<String, AzureError> {
        let xml = quick_xml::se::to_string(body)
            .map_err(|e| AzureError::Deserialize(format!("cannot encode request: {}", e)))?;
        Ok(format!(r#"<?xml version="1.0" encoding="utf-8"?>{}"#, xml))
    }

    fn request_id(response: &Response) -> Result<String, AzureError> {
        response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| AzureError::Deserialize("missing x-ms-request-id header".to_string()))
    }

    async fn parse_xml<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, AzureError> {
        let body = response.text().await?;
        quick_xml::de::from_str(&body).map_err(|e| AzureError::Deserialize(e.to_string()))
    }
}

#[async_trait]
impl ServiceManagement for ServiceManagementClient {
    async fn get_hosted_service_properties(&self, name: &str) -> Result<HostedService, AzureError> {
        let url = self.url(&["services", "hostedservices", name])?;
        let response = self.request(self.http.get(url)).send().await?;
        let response = check_response(response, name).await?;
        Self::parse_xml(response).await
    }

    async fn create_hosted_service(&self, request: &CreateHostedService) -> Result<String, AzureError> {
        let body = Self::xml_body(request)?;
        let response = self
            .request(self.http.post(self.url(&["services", "hostedservices"])?))
            .header("content-type", "application/xml")
            .body(body)
            .send()
            .await?;
        let response = check_response(response, &request.service_name).await?;
        Self::request_id(&response)
    }

    async fn update_hosted_service(
        &self,
        name: &str,
        request: &UpdateHostedService,
    ) -> Result<String, AzureError> {
        let body = Self::xml_body(request)?;
        let url = self.url(&["services", "hostedservices", name])?;
        let response = self
            .request(self.http.put(url))
            .header("content-type", "application/xml")
            .body(body)
            .send()
            .await?;
        let response = check_response(response, name).await?;
        Self::request_id(&response)
    }

    async fn delete_hosted_service(&self, name: &str) -> Result<String, AzureError> {
        let url = self.url(&["services", "hostedservices", name])?;
        let response = self.request(self.http.delete(url)).send().await?;
        let response = check_response(response, name).await?;
        Self::request_id(&response)
    }

    async fn get_operation_status(&self, request_id: &str) -> Result<Operation, AzureError> {
        let url = self.url(&["operations", request_id])?;
        let response = self.request(self.http.get(url)).send().await?;
        let response = check_response(response, request_id).await?;
        Self::parse_xml(response).await
    }
}
