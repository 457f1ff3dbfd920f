//! Asynchronous QoD client implementation.

use crate::models::{CreateSessionRequest, SessionInfo, SessionListParams};
use crate::Result;
use nac_core::client::{
    default_timeout, ClientConfig, ServiceClient, ServiceClientBuilder, Transport,
};
use nac_core::config::NacClientConfig;
use nac_core::types::NacService;
use nac_core::Error;
use reqwest::Method;
use std::sync::Arc;
use tracing::debug;

/// Builder for [`QodClient`].
pub struct QodClientBuilder {
    inner: ServiceClientBuilder,
}

impl QodClientBuilder {
    /// Create a builder for the specified base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            NacService::QualityOfService,
            base_url,
            default_timeout(NacService::QualityOfService),
        )?;

        Ok(Self { inner: builder })
    }

    /// Create a builder using the endpoint resolved from a client configuration.
    pub fn from_config(config: &NacClientConfig) -> Result<Self> {
        let builder = ServiceClientBuilder::from_config(NacService::QualityOfService, config)?;
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
    pub fn build(self) -> Result<QodClient> {
        let inner = self.inner.build()?;
        Ok(QodClient { inner })
    }
}

/// Asynchronous QoD client.
#[derive(Debug, Clone)]
pub struct QodClient {
    inner: ServiceClient,
}

impl QodClient {
    /// Construct a client directly from the base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        QodClientBuilder::new(base_url)?.build()
    }

    /// Create a session.
    ///
    /// Fails with [`Error::ValidationError`] before sending anything when the device has
    /// no IP address or no application server address is given.
    pub async fn create_session(&self, request: &CreateSessionRequest) -> Result<SessionInfo> {
        if !request.device.has_ip_address() {
            return Err(Error::ValidationError(
                "device must have an IPv4 or IPv6 address to create a QoD session".into(),
            ));
        }
        if !request.application_server.has_address() {
            return Err(Error::ValidationError(
                "At least one of IP parameters must be provided".into(),
            ));
        }

        self.inner
            .send_json(Method::POST, &["sessions"], Some(request), &[])
            .await
    }

    /// Fetch a session by its ID.
    pub async fn get_session(&self, id: &str) -> Result<SessionInfo> {
        self.inner.get_json(&["sessions", id], &[]).await
    }

    /// List sessions matching the filters.
    pub async fn list_sessions(&self, params: &SessionListParams) -> Result<Vec<SessionInfo>> {
        self.inner.get_json(&["sessions"], &params.to_pairs()).await
    }

    /// Delete a session.
    pub async fn delete_session(&self, id: &str) -> Result<()> {
        self.inner
            .execute::<()>(Method::DELETE, &["sessions", id], None, &[])
            .await?;
        debug!(session = id, "QoD session deleted");
        Ok(())
    }
}
