//! Blob storage client
//!
//! Only container creation and block blob upload are needed. Requests are
//! signed with the storage account's Shared Key.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client, Method, StatusCode, Url};
use sha2::Sha256;
use tracing::debug;

use super::{AzureError, check_response};
use crate::config::StorageConfig;
use crate::constants::BLOB_API_VERSION;

/// Where uploaded files go
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Create a container; an existing container is not an error
    async fn create_container(&self, name: &str, public_access: bool) -> Result<(), AzureError>;

    /// Upload a block blob and return its public URL
    async fn upload(
        &self,
        container: &str,
        blob_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AzureError>;
}

/// Blob REST client authenticated with Shared Key
#[derive(Debug, Clone)]
pub struct AzureBlobStore {
    http: Client,
    account_name: String,
    key: Vec<u8>,
    endpoint: String,
}

impl AzureBlobStore {
    /// `account_key` is the base64 key shown in the storage account settings
    pub fn new(account_name: &str, account_key: &str, endpoint: Option<&str>) -> Result<Self, AzureError> {
        let key = BASE64
            .decode(account_key.trim())
            .map_err(|_| AzureError::Configuration("storage account key is not base64".to_string()))?;
        let endpoint = endpoint
            .map(|e| e.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("https://{}.blob.core.windows.net", account_name));

        Ok(Self {
            http: Client::builder().use_rustls_tls().build()?,
            account_name: account_name.to_string(),
            key,
            endpoint,
        })
    }

    /// Build a store from configuration, `None` when the account is not configured
    pub fn from_config(config: &StorageConfig) -> Result<Option<Self>, AzureError> {
        match (config.account_name.as_deref(), config.account_key.as_deref()) {
            (Some(name), Some(key)) => Self::new(name, key, config.blob_endpoint.as_deref()).map(Some),
            _ => Ok(None),
        }
    }

    fn url(&self, path: &str) -> Result<Url, AzureError> {
        Url::parse(&format!("{}/{}", self.endpoint, path))
            .map_err(|e| AzureError::Configuration(format!("invalid blob url: {}", e)))
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        mut headers: Vec<(&'static str, String)>,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> Result<reqwest::Response, AzureError> {
        headers.push(("x-ms-date", Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()));
        headers.push(("x-ms-version", BLOB_API_VERSION.to_string()));

        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let to_sign = string_to_sign(&SignedRequest {
            method: method.as_str(),
            content_length: body.len(),
            content_type: content_type.unwrap_or(""),
            ms_headers: &headers,
            account_name: &self.account_name,
            path: url.path(),
            query: &query,
        });
        let signature = sign(&self.key, &to_sign)?;

        let mut request = self
            .http
            .request(method, url)
            .header("authorization", format!("SharedKey {}:{}", self.account_name, signature));
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }
        for (name, value) in &headers {
            request = request.header(*name, value);
        }

        Ok(request.body(body).send().await?)
    }
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    async fn create_container(&self, name: &str, public_access: bool) -> Result<(), AzureError> {
        let url = self.url(&format!("{}?restype=container", name))?;
        let mut headers = Vec::new();
        if public_access {
            headers.push(("x-ms-blob-public-access", "container".to_string()));
        }

        let response = self.send(Method::PUT, url, headers, None, Vec::new()).await?;
        if response.status() == StatusCode::CONFLICT {
            debug!(container = %name, "container already exists");
            return Ok(());
        }
        check_response(response, name).await?;
        debug!(container = %name, "container created");
        Ok(())
    }

    async fn upload(
        &self,
        container: &str,
        blob_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AzureError> {
        let url = self.url(&format!("{}/{}", container, blob_name))?;
        let public_url = url.to_string();
        let headers = vec![("x-ms-blob-type", "BlockBlob".to_string())];

        let response = self
            .send(Method::PUT, url, headers, Some(content_type), data)
            .await?;
        check_response(response, blob_name).await?;
        Ok(public_url)
    }
}

/// The parts of a request covered by the Shared Key signature
struct SignedRequest<'a> {
    method: &'a str,
    content_length: usize,
    content_type: &'a str,
    ms_headers: &'a [(&'static str, String)],
    account_name: &'a str,
    path: &'a str,
    query: &'a [(String, String)],
}

/// Canonical string for Shared Key authorisation.
///
/// `Date` stays empty because `x-ms-date` is always sent; a zero content
/// length is signed as an empty string.
fn string_to_sign(req: &SignedRequest<'_>) -> String {
    let content_length = if req.content_length == 0 {
        String::new()
    } else {
        req.content_length.to_string()
    };

    let mut ms_headers: Vec<(String, &str)> = req
        .ms_headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.trim()))
        .collect();
    ms_headers.sort_by(|a, b| a.0.cmp(&b.0));
    let canonical_headers: String = ms_headers
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value))
        .collect();

    let mut query: Vec<(String, &str)> = req
        .query
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.as_str()))
        .collect();
    query.sort_by(|a, b| a.0.cmp(&b.0));
    let mut canonical_resource = format!("/{}{}", req.account_name, req.path);
    for (name, value) in query {
        canonical_resource.push_str(&format!("\n{}:{}", name, value));
    }

    [
        req.method,
        "", // Content-Encoding
        "", // Content-Language
        content_length.as_str(),
        "", // Content-MD5
        req.content_type,
        "", // Date
        "", // If-Modified-Since
        "", // If-Match
        "", // If-None-Match
        "", // If-Unmodified-Since
        "", // Range
    ]
    .join("\n")
        + "\n"
        + &canonical_headers
        + &canonical_resource
}

fn sign(key: &[u8], string_to_sign: &str) -> Result<String, AzureError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| AzureError::Configuration(format!("invalid storage key: {}", e)))?;
    mac.update(string_to_sign.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, header_exists, method, path, query_param},
    };

    const KEY: &str = "c2VjcmV0LWtleQ=="; // "secret-key"

    #[test]
    fn test_string_to_sign_layout() {
        let headers = vec![
            ("x-ms-version", BLOB_API_VERSION.to_string()),
            ("x-ms-blob-type", "BlockBlob".to_string()),
            ("x-ms-date", "Mon, 01 Jan 2024 00:00:00 GMT".to_string()),
        ];
        let query = vec![("restype".to_string(), "container".to_string())];
        let signed = string_to_sign(&SignedRequest {
            method: "PUT",
            content_length: 11,
            content_type: "image/png",
            ms_headers: &headers,
            account_name: "acct",
            path: "/images/a.png",
            query: &query,
        });

        let expected = format!(
            "PUT\n\n\n11\n\nimage/png\n\n\n\n\n\n\n\
             x-ms-blob-type:BlockBlob\n\
             x-ms-date:Mon, 01 Jan 2024 00:00:00 GMT\n\
             x-ms-version:{}\n\
             /acct/images/a.png\nrestype:container",
            BLOB_API_VERSION
        );
        assert_eq!(signed, expected);
    }

    #[test]
    fn test_zero_length_is_signed_empty() {
        let signed = string_to_sign(&SignedRequest {
            method: "PUT",
            content_length: 0,
            content_type: "",
            ms_headers: &[],
            account_name: "acct",
            path: "/images",
            query: &[],
        });
        assert!(signed.starts_with("PUT\n\n\n\n"));
    }

    #[test]
    fn test_sign_is_deterministic_base64() {
        let key = BASE64.decode(KEY).unwrap();
        let a = sign(&key, "payload").unwrap();
        assert_eq!(a, sign(&key, "payload").unwrap());
        assert_ne!(a, sign(&key, "other").unwrap());
        assert_eq!(BASE64.decode(&a).unwrap().len(), 32);
    }

    #[test]
    fn test_rejects_non_base64_key() {
        let err = AzureBlobStore::new("acct", "not base64!", None).unwrap_err();
        assert!(matches!(err, AzureError::Configuration(_)));
    }

    #[test]
    fn test_default_endpoint_uses_account() {
        let store = AzureBlobStore::new("acct", KEY, None).unwrap();
        assert_eq!(store.endpoint, "https://acct.blob.core.windows.net");
    }

    #[tokio::test]
    async fn test_create_container_tolerates_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/images"))
            .and(query_param("restype", "container"))
            .and(header("x-ms-blob-public-access", "container"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let store = AzureBlobStore::new("acct", KEY, Some(&server.uri())).unwrap();
        store.create_container("images", true).await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_returns_blob_url() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/images/hack/abc.png"))
            .and(header("x-ms-blob-type", "BlockBlob"))
            .and(header("content-type", "image/png"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let store = AzureBlobStore::new("acct", KEY, Some(&server.uri())).unwrap();
        let url = store
            .upload("images", "hack/abc.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();
        assert_eq!(url, format!("{}/images/hack/abc.png", server.uri()));
    }

    #[tokio::test]
    async fn test_upload_failure_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403).set_body_string(
                "<Error><Code>AuthenticationFailed</Code><Message>Signature mismatch</Message></Error>",
            ))
            .mount(&server)
            .await;

        let store = AzureBlobStore::new("acct", KEY, Some(&server.uri())).unwrap();
        let err = store
            .upload("images", "hack/abc.png", vec![1], "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, AzureError::Http { status: 403, .. }));
    }
}
