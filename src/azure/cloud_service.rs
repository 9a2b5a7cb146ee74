//! Cloud service adapter
//!
//! Wraps a [`ServiceManagement`] client into synchronous-looking calls: each
//! mutating call waits for its asynchronous operation and reports a plain
//! success flag. Provider-side validation is trusted; nothing is checked
//! locally before a create.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, error};

use super::AzureError;
use super::management::{
    CreateHostedService, CreateHostedServiceExtra, Operation, OperationStatus, ServiceManagement,
    UpdateHostedService,
};
use crate::config::AzureConfig;

/// Hosted service operations with operation polling
#[derive(Clone)]
pub struct CloudServiceAdapter {
    service: Arc<dyn ServiceManagement>,
    poll_timeout: Duration,
    poll_interval: Duration,
}

impl CloudServiceAdapter {
    pub fn new(service: Arc<dyn ServiceManagement>, poll_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            service,
            poll_timeout,
            poll_interval,
        }
    }

    pub fn from_config(service: Arc<dyn ServiceManagement>, config: &AzureConfig) -> Self {
        Self::new(service, config.poll_timeout, config.poll_interval)
    }

    /// Whether the hosted service exists in the subscription
    pub async fn cloud_service_exists(&self, name: &str) -> Result<bool, AzureError> {
        match self.service.get_hosted_service_properties(name).await {
            Ok(_) => Ok(true),
            Err(AzureError::MissingResource(_)) => Ok(false),
            Err(e) => {
                error!(service = %name, error = %e, "failed to query cloud service");
                Err(e)
            }
        }
    }

    /// Create a hosted service and wait until the provider finishes
    pub async fn create_cloud_service(
        &self,
        name: &str,
        label: &str,
        location: &str,
        extra: CreateHostedServiceExtra,
    ) -> Result<bool, AzureError> {
        let request = CreateHostedService::new(name, label, location, extra);
        let request_id = match self.service.create_hosted_service(&request).await {
            Ok(id) => id,
            Err(e) if e.is_http_error() => {
                debug!(service = %name, error = %e, "create cloud service failed");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        debug!(service = %name, "cloud service creation in progress");
        self.finish(name, "creation", &request_id).await
    }

    /// Update label and/or description of a hosted service
    pub async fn update_cloud_service(
        &self,
        name: &str,
        label: Option<&str>,
        description: Option<&str>,
    ) -> Result<bool, AzureError> {
        let request = UpdateHostedService::new(label, description);
        let request_id = match self.service.update_hosted_service(name, &request).await {
            Ok(id) => id,
            Err(e) if e.is_http_error() => {
                debug!(service = %name, error = %e, "update cloud service failed");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        self.finish(name, "update", &request_id).await
    }

    /// Delete a hosted service
    pub async fn delete_cloud_service(&self, name: &str) -> Result<bool, AzureError> {
        let request_id = match self.service.delete_hosted_service(name).await {
            Ok(id) => id,
            Err(e) if e.is_http_error() => {
                debug!(service = %name, error = %e, "delete cloud service failed");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        self.finish(name, "deletion", &request_id).await
    }

    async fn finish(&self, name: &str, action: &str, request_id: &str) -> Result<bool, AzureError> {
        let operation = self.wait_for_operation_status(request_id).await?;
        if operation.status == OperationStatus::Succeeded {
            debug!(service = %name, action, "cloud service operation done");
            Ok(true)
        } else {
            debug!(
                service = %name,
                action,
                status = ?operation.status,
                error = ?operation.error,
                "cloud service operation failed"
            );
            Ok(false)
        }
    }

    /// Poll an operation until it succeeds, reports an error, or the timeout elapses.
    ///
    /// Returns the last observed status in every case.
    pub async fn wait_for_operation_status(&self, request_id: &str) -> Result<Operation, AzureError> {
        let deadline = Instant::now() + self.poll_timeout;

        loop {
            let operation = self.service.get_operation_status(request_id).await?;

            if operation.status == OperationStatus::Succeeded
                || operation.status == OperationStatus::Failed
                || operation.error.is_some()
            {
                return Ok(operation);
            }

            if Instant::now() + self.poll_interval > deadline {
                debug!(request_id, timeout = ?self.poll_timeout, "operation still in progress at timeout");
                return Ok(operation);
            }

            sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::management::{HostedService, MockServiceManagement, OperationError};

    fn operation(status: OperationStatus) -> Operation {
        Operation {
            id: "req-1".to_string(),
            status,
            http_status_code: None,
            error: None,
        }
    }

    fn adapter(mock: MockServiceManagement) -> CloudServiceAdapter {
        CloudServiceAdapter::new(Arc::new(mock), Duration::from_millis(50), Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_exists_true_when_properties_found() {
        let mut mock = MockServiceManagement::new();
        mock.expect_get_hosted_service_properties()
            .withf(|name| name == "svc")
            .returning(|name| {
                Ok(HostedService {
                    url: None,
                    service_name: name.to_string(),
                    properties: None,
                })
            });

        assert!(adapter(mock).cloud_service_exists("svc").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_false_on_missing_resource() {
        let mut mock = MockServiceManagement::new();
        mock.expect_get_hosted_service_properties()
            .returning(|name| Err(AzureError::MissingResource(name.to_string())));

        assert!(!adapter(mock).cloud_service_exists("svc").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_propagates_other_errors() {
        let mut mock = MockServiceManagement::new();
        mock.expect_get_hosted_service_properties().returning(|_| {
            Err(AzureError::Http {
                status: 403,
                message: "forbidden".to_string(),
            })
        });

        let err = adapter(mock).cloud_service_exists("svc").await.unwrap_err();
        assert!(matches!(err, AzureError::Http { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_create_waits_for_success() {
        let mut mock = MockServiceManagement::new();
        mock.expect_create_hosted_service()
            .withf(|req| req.service_name == "svc" && req.location.as_deref() == Some("East US"))
            .returning(|_| Ok("req-1".to_string()));

        let mut polls = 0;
        mock.expect_get_operation_status()
            .times(3)
            .returning(move |_| {
                polls += 1;
                if polls < 3 {
                    Ok(operation(OperationStatus::InProgress))
                } else {
                    Ok(operation(OperationStatus::Succeeded))
                }
            });

        let created = adapter(mock)
            .create_cloud_service("svc", "label", "East US", Default::default())
            .await
            .unwrap();
        assert!(created);
    }

    #[tokio::test]
    async fn test_create_false_when_provider_rejects() {
        let mut mock = MockServiceManagement::new();
        mock.expect_create_hosted_service().returning(|_| {
            Err(AzureError::Http {
                status: 409,
                message: "ConflictError".to_string(),
            })
        });
        mock.expect_get_operation_status().never();

        let created = adapter(mock)
            .create_cloud_service("svc", "label", "East US", Default::default())
            .await
            .unwrap();
        assert!(!created);
    }

    #[tokio::test]
    async fn test_create_false_when_operation_fails() {
        let mut mock = MockServiceManagement::new();
        mock.expect_create_hosted_service().returning(|_| Ok("req-1".to_string()));
        mock.expect_get_operation_status().returning(|_| {
            Ok(Operation {
                error: Some(OperationError {
                    code: Some("BadRequest".to_string()),
                    message: Some("Invalid location.".to_string()),
                }),
                ..operation(OperationStatus::Failed)
            })
        });

        let created = adapter(mock)
            .create_cloud_service("svc", "label", "Nowhere", Default::default())
            .await
            .unwrap();
        assert!(!created);
    }

    #[tokio::test]
    async fn test_wait_returns_last_status_on_timeout() {
        let mut mock = MockServiceManagement::new();
        mock.expect_get_operation_status()
            .returning(|_| Ok(operation(OperationStatus::InProgress)));

        let adapter =
            CloudServiceAdapter::new(Arc::new(mock), Duration::from_millis(5), Duration::from_millis(2));
        let operation = adapter.wait_for_operation_status("req-1").await.unwrap();
        assert_eq!(operation.status, OperationStatus::InProgress);
    }

    #[tokio::test]
    async fn test_delete_waits_for_operation() {
        let mut mock = MockServiceManagement::new();
        mock.expect_delete_hosted_service()
            .withf(|name| name == "svc")
            .returning(|_| Ok("req-2".to_string()));
        mock.expect_get_operation_status()
            .withf(|id| id == "req-2")
            .returning(|_| Ok(operation(OperationStatus::Succeeded)));

        assert!(adapter(mock).delete_cloud_service("svc").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_service_is_false() {
        let mut mock = MockServiceManagement::new();
        mock.expect_update_hosted_service()
            .returning(|name, _| Err(AzureError::MissingResource(name.to_string())));

        assert!(!adapter(mock)
            .update_cloud_service("svc", Some("new label"), None)
            .await
            .unwrap());
    }
}
