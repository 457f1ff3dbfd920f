//! Asynchronous location client implementation.

use crate::models::{
    Area, LocationResponse, RetrieveLocationRequest, VerifyLocationRequest,
    VerifyLocationResponse,
};
use crate::Result;
use nac_core::client::{
    default_timeout, ClientConfig, ServiceClient, ServiceClientBuilder, Transport,
};
use nac_core::config::NacClientConfig;
use nac_core::types::{DeviceIdentifier, NacService};
use reqwest::Method;
use std::sync::Arc;
use tracing::debug;

/// Builder for [`LocationClient`].
pub struct LocationClientBuilder {
    retrieval: ServiceClientBuilder,
    verification: ServiceClientBuilder,
}

impl LocationClientBuilder {
    /// Create a builder serving both APIs from one base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = base_url.as_ref();
        Ok(Self {
            retrieval: ServiceClientBuilder::new(
                NacService::LocationRetrieval,
                base_url,
                default_timeout(NacService::LocationRetrieval),
            )?,
            verification: ServiceClientBuilder::new(
                NacService::LocationVerification,
                base_url,
                default_timeout(NacService::LocationVerification),
            )?,
        })
    }

    /// Create a builder using the endpoints resolved from a client configuration.
    pub fn from_config(config: &NacClientConfig) -> Result<Self> {
        Ok(Self {
            retrieval: ServiceClientBuilder::from_config(NacService::LocationRetrieval, config)?,
            verification: ServiceClientBuilder::from_config(
                NacService::LocationVerification,
                config,
            )?,
        })
    }

    /// Override the routing host of the retrieval API.
    #[must_use]
    pub fn with_retrieval_host(mut self, host: impl Into<String>) -> Self {
        self.retrieval = self.retrieval.with_host(host);
        self
    }

    /// Override the routing host of the verification API.
    #[must_use]
    pub fn with_verification_host(mut self, host: impl Into<String>) -> Self {
        self.verification = self.verification.with_host(host);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.retrieval = self.retrieval.with_http_config(config.clone());
        self.verification = self.verification.with_http_config(config);
        self
    }

    /// Configure the API key.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.retrieval = self.retrieval.with_token(token.clone());
        self.verification = self.verification.with_token(token);
        self
    }

    /// Share an existing transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.retrieval = self.retrieval.with_transport(Arc::clone(&transport));
        self.verification = self.verification.with_transport(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<LocationClient> {
        Ok(LocationClient {
            retrieval: self.retrieval.build()?,
            verification: self.verification.build()?,
        })
    }
}

/// Asynchronous client for the location APIs.
#[derive(Debug, Clone)]
pub struct LocationClient {
    retrieval: ServiceClient,
    verification: ServiceClient,
}

impl LocationClient {
    /// Construct a client serving both APIs from one base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        LocationClientBuilder::new(base_url)?.build()
    }

    /// Retrieve the current location of a device.
    pub async fn retrieve_location(
        &self,
        device: &DeviceIdentifier,
        max_age: u32,
    ) -> Result<LocationResponse> {
        let request = RetrieveLocationRequest {
            device: device.clone(),
            max_age,
        };
        self.retrieval
            .send_json(Method::POST, &["retrieve"], Some(&request), &[])
            .await
    }

    /// Ask the server whether a device is within an area.
    ///
    /// Radius and maximum age are passed through unchanged; the server decides.
    pub async fn verify_location(
        &self,
        device: &DeviceIdentifier,
        area: Area,
        max_age: u32,
    ) -> Result<VerifyLocationResponse> {
        let request = VerifyLocationRequest {
            device: device.clone(),
            area,
            max_age,
        };
        let response: VerifyLocationResponse = self
            .verification
            .send_json(Method::POST, &["verify"], Some(&request), &[])
            .await?;
        debug!(result = ?response.verification_result, "location verification answered");
        Ok(response)
    }
}
