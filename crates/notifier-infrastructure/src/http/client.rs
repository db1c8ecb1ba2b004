use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use notifier_domain::notification::{
    CreatedNotification, GatewayError, NotificationDraft, NotificationGateway, NotificationId,
    NotificationRecord,
};

use super::types::{ApiEnvelope, ErrorBody};
use crate::config::ApiConfig;

/// `NotificationGateway` over the backend's JSON REST API.
///
/// Every call is a single attempt: no retry, no request timeout.
pub struct HttpNotificationGateway {
    client: Client,
    config: ApiConfig,
}

impl HttpNotificationGateway {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Reuse an existing client, e.g. one shared with the host
    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Decode a 2xx `{ "result": ... }` body, or turn a failure into a `GatewayError`
    async fn read_result<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let response = Self::ensure_success(response).await?;

        let envelope: ApiEnvelope<T> = response.json().await.map_err(|e| {
            warn!("Failed to decode success response: {}", e);
            GatewayError::transport(format!("Malformed response from server: {e}"))
        })?;

        Ok(envelope.result)
    }

    async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.map_err(|e| {
            GatewayError::transport(format!("Failed to read error response: {e}"))
        })?;

        match serde_json::from_slice::<ErrorBody>(&body) {
            Ok(ErrorBody { error }) => {
                warn!(status = status.as_u16(), error = %error, "Backend rejected request");
                Err(GatewayError::rejected(status.as_u16(), error))
            }
            Err(e) => {
                warn!(
                    status = status.as_u16(),
                    "Backend returned an undecodable error body: {}", e
                );
                Err(GatewayError::transport(format!(
                    "Unexpected response from server (HTTP {})",
                    status.as_u16()
                )))
            }
        }
    }

    fn transport_error(operation: &str, err: reqwest::Error) -> GatewayError {
        warn!("{} request failed: {}", operation, err);
        GatewayError::transport(err.to_string())
    }
}

#[async_trait]
impl NotificationGateway for HttpNotificationGateway {
    async fn create(
        &self,
        draft: &NotificationDraft,
    ) -> Result<CreatedNotification, GatewayError> {
        let url = self.config.notify_url();
        info!(
            url = %url,
            channel = %draft.channel(),
            recipient_id = draft.recipient_id(),
            "Creating notification"
        );

        let response = self
            .client
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| Self::transport_error("Create", e))?;

        debug!("Create response status: {}", response.status());

        let created: CreatedNotification = Self::read_result(response).await?;
        info!(notification_id = %created.id, "Notification created");
        Ok(created)
    }

    async fn find(&self, id: &NotificationId) -> Result<NotificationRecord, GatewayError> {
        let url = self.config.notification_url(id.as_str());
        debug!(url = %url, "Fetching notification");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Self::transport_error("Lookup", e))?;

        let record: NotificationRecord = Self::read_result(response).await?;
        debug!(notification_id = %record.id, status = %record.status, "Notification fetched");
        Ok(record)
    }

    async fn cancel(&self, id: &NotificationId) -> Result<(), GatewayError> {
        let url = self.config.notification_url(id.as_str());
        info!(url = %url, "Cancelling notification");

        let response = self
            .client
            .delete(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Self::transport_error("Cancel", e))?;

        // Success body is not part of the contract
        Self::ensure_success(response).await?;
        info!(notification_id = %id, "Notification cancelled");
        Ok(())
    }
}
