//! Helpers shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use nac_core::client::{ApiRequest, ApiResponse, Transport};
use network_as_code::{
    DeviceIdentifier, DeviceIpv4Addr, NacClientConfig, NetworkAsCodeClient,
    ServiceEndpointConfig, ServiceEndpoints,
};
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "TEST_TOKEN";

/// Client whose every API is served by the mock server.
pub fn client_for(server: &MockServer) -> NetworkAsCodeClient {
    let endpoint = ServiceEndpointConfig::new(server.uri()).unwrap();
    NetworkAsCodeClient::builder(TEST_TOKEN)
        .with_config(NacClientConfig::default().with_endpoints(ServiceEndpoints::all_at(&endpoint)))
        .build()
        .unwrap()
}

/// Identifier of the device used throughout the tests.
pub fn test_device() -> DeviceIdentifier {
    DeviceIdentifier::new()
        .with_network_access_identifier("test-device@testcsp.net")
        .with_ipv4_address(
            DeviceIpv4Addr::new("1.1.1.2")
                .with_private_address("1.1.1.2")
                .with_public_port(80),
        )
        .with_phone_number("9382948473")
}

/// Transport that records requests and answers every one with the same response.
pub struct RecordingTransport {
    status: StatusCode,
    body: String,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub fn new(status: StatusCode, body: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> nac_core::Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(ApiResponse::new(self.status, self.body.clone()))
    }
}
