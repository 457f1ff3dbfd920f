//! Asynchronous slicing client implementation.

use crate::models::{SliceData, SliceResponse, SliceStateResponse};
use crate::Result;
use nac_core::client::{
    default_timeout, ClientConfig, ServiceClient, ServiceClientBuilder, Transport,
};
use nac_core::config::NacClientConfig;
use nac_core::types::NacService;
use reqwest::Method;
use std::sync::Arc;
use tracing::debug;

/// Builder for [`SlicingClient`].
pub struct SlicingClientBuilder {
    inner: ServiceClientBuilder,
}

impl SlicingClientBuilder {
    /// Create a builder for the specified base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            NacService::NetworkSlicing,
            base_url,
            default_timeout(NacService::NetworkSlicing),
        )?;

        Ok(Self { inner: builder })
    }

    /// Create a builder using the endpoint resolved from a client configuration.
    pub fn from_config(config: &NacClientConfig) -> Result<Self> {
        let builder = ServiceClientBuilder::from_config(NacService::NetworkSlicing, config)?;
        Ok(Self { inner: builder })
    }

    /// Override the routing host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.inner = self.inner.with_host(host);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Configure the API key.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.with_token(token);
        self
    }

    /// Share an existing transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.inner = self.inner.with_transport(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<SlicingClient> {
        let inner = self.inner.build()?;
        Ok(SlicingClient { inner })
    }
}

/// Asynchronous slicing client.
#[derive(Debug, Clone)]
pub struct SlicingClient {
    inner: ServiceClient,
}

impl SlicingClient {
    /// Construct a client directly from the base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        SlicingClientBuilder::new(base_url)?.build()
    }

    /// Create a slice.
    pub async fn create_slice(&self, request: &SliceData) -> Result<SliceResponse> {
        self.inner
            .send_json(Method::POST, &["slices"], Some(request), &[])
            .await
    }

    /// List all slices.
    pub async fn list_slices(&self) -> Result<Vec<SliceResponse>> {
        self.inner.get_json(&["slices"], &[]).await
    }

    /// Fetch a slice by name.
    pub async fn get_slice(&self, name: &str) -> Result<SliceResponse> {
        self.inner.get_json(&["slices", name], &[]).await
    }

    /// Request activation of a slice.
    pub async fn activate_slice(&self, name: &str) -> Result<Option<SliceStateResponse>> {
        self.action(name, "activate").await
    }

    /// Request deactivation of a slice.
    pub async fn deactivate_slice(&self, name: &str) -> Result<Option<SliceStateResponse>> {
        self.action(name, "deactivate").await
    }

    /// Request deletion of a slice.
    pub async fn delete_slice(&self, name: &str) -> Result<Option<SliceStateResponse>> {
        self.inner
            .send_json_opt::<(), _>(Method::DELETE, &["slices", name], None, &[])
            .await
    }

    async fn action(&self, name: &str, action: &str) -> Result<Option<SliceStateResponse>> {
        let response = self
            .inner
            .send_json_opt::<(), SliceStateResponse>(
                Method::POST,
                &["slices", name, action],
                None,
                &[],
            )
            .await?;
        debug!(slice = name, action, state = ?response.and_then(|r| r.state), "slice action accepted");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NetworkIdentifier, SliceInfo, SliceState};
    use nac_core::Error;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> SlicingClient {
        SlicingClient::new(server.uri()).unwrap()
    }

    fn slice_json(name: &str, state: &str) -> serde_json::Value {
        json!({
            "slice": {
                "name": name,
                "networkIdentifier": { "mcc": "236", "mnc": "30" },
                "sliceInfo": { "service_type": "eMBB", "differentiator": "444444" },
                "notificationUrl": "https://notify.me/here"
            },
            "startPollingAt": 1700000000,
            "csi_id": "csi-1",
            "state": state
        })
    }

    #[tokio::test]
    async fn create_slice_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/slices"))
            .and(body_json(json!({
                "name": "slice-1",
                "networkIdentifier": { "mcc": "236", "mnc": "30" },
                "sliceInfo": { "service_type": "eMBB", "differentiator": "444444" },
                "notificationUrl": "https://notify.me/here",
                "notificationAuthToken": "my-token"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(slice_json("slice-1", "PENDING")))
            .expect(1)
            .mount(&server)
            .await;

        let request = SliceData {
            name: Some("slice-1".into()),
            network_identifier: NetworkIdentifier::new("236", "30"),
            slice_info: SliceInfo::new("eMBB", "444444"),
            area_of_service: None,
            max_data_connections: None,
            max_devices: None,
            slice_downlink_throughput: None,
            slice_uplink_throughput: None,
            device_downlink_throughput: None,
            device_uplink_throughput: None,
            notification_url: "https://notify.me/here".into(),
            notification_auth_token: Some("my-token".into()),
        };

        let response = test_client(&server).create_slice(&request).await.unwrap();
        assert_eq!(response.state, SliceState::Pending);
        assert_eq!(response.csi_id.as_deref(), Some("csi-1"));
        assert_eq!(response.start_polling_at, Some(1_700_000_000));
    }

    #[tokio::test]
    async fn list_slices_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                slice_json("a", "AVAILABLE"),
                slice_json("b", "OPERATING")
            ])))
            .mount(&server)
            .await;

        let slices = test_client(&server).list_slices().await.unwrap();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[1].state, SliceState::Operating);
    }

    #[tokio::test]
    async fn activate_with_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/slices/slice-1/activate"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_client(&server).activate_slice("slice-1").await.unwrap();
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn deactivate_echoes_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/slices/slice-1/deactivate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(slice_json("slice-1", "OPERATING")))
            .mount(&server)
            .await;

        let response = test_client(&server)
            .deactivate_slice("slice-1")
            .await
            .unwrap();
        assert_eq!(response.and_then(|r| r.state), Some(SliceState::Operating));
    }

    #[tokio::test]
    async fn activate_rejected_in_wrong_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/slices/slice-1/activate"))
            .respond_with(ResponseTemplate::new(409).set_body_string("slice is PENDING"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .activate_slice("slice-1")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn get_slice_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slices/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = test_client(&server).get_slice("ghost").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_escapes_slice_name() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/slices/team%231%2Factivate"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_client(&server)
            .delete_slice("team#1/activate")
            .await
            .unwrap();
        assert!(response.is_none());
    }
}
