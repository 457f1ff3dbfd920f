//! HTTP transport and per-service request plumbing.
//!
//! [`Transport`] is the seam between the typed clients and the network: it takes a fully
//! resolved [`ApiRequest`] and returns the raw [`ApiResponse`]. [`HttpTransport`] is the
//! reqwest implementation that injects the API key. [`ServiceClient`] binds a transport to
//! one remote API (base URL plus routing host), maps HTTP statuses to [`Error`] and parses
//! JSON bodies. Requests are never retried.

use crate::config::NacClientConfig;
use crate::types::NacService;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{ClientBuilder, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

// Service-specific timeout configurations (in seconds)

/// Default timeout for location retrieval and verification requests
pub const LOCATION_DEFAULT_TIMEOUT: u64 = 20;

/// Default timeout for quality-of-service-on-demand requests
pub const QOD_DEFAULT_TIMEOUT: u64 = 30;

/// Default timeout for network slicing requests
pub const SLICING_DEFAULT_TIMEOUT: u64 = 30;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

// Headers

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-RapidAPI-Key";

/// Header routing the request to the target service.
pub const HOST_HEADER: &str = "X-RapidAPI-Host";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("network-as-code-rust/", env!("CARGO_PKG_VERSION"));

/// Returns the default request timeout for a service.
#[must_use]
pub const fn default_timeout(service: NacService) -> Duration {
    match service {
        NacService::LocationRetrieval | NacService::LocationVerification => {
            Duration::from_secs(LOCATION_DEFAULT_TIMEOUT)
        }
        NacService::QualityOfService => Duration::from_secs(QOD_DEFAULT_TIMEOUT),
        NacService::NetworkSlicing => Duration::from_secs(SLICING_DEFAULT_TIMEOUT),
    }
}

/// HTTP client configuration.
///
/// Configures timeouts, connection pooling and TLS of the reqwest transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable response compression
    pub enable_compression: bool,

    /// Verify TLS certificates
    pub tls_verify: bool,

    /// Additional trusted CA certificate (PEM)
    pub tls_ca_cert: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_compression: true,
            tls_verify: true,
            tls_ca_cert: None,
        }
    }

    /// Derive the HTTP settings from a client configuration.
    #[must_use]
    pub fn from_nac_config(config: &NacClientConfig) -> Self {
        let mut http = Self::new()
            .with_timeout(config.timeout())
            .with_tls_verify(config.tls_verify);
        http.tls_ca_cert.clone_from(&config.tls_ca_cert);
        http
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Trust an additional CA certificate.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully resolved request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including the query string
    pub url: Url,
    /// Extra headers (routing host and the like)
    pub headers: Vec<(&'static str, String)>,
    /// JSON body, if any
    pub body: Option<serde_json::Value>,
    /// Per-request timeout override
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    /// Look up an extra header by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response body as text (empty when the server sent none)
    pub body: String,
}

impl ApiResponse {
    /// Create a response from a status and a body.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns true if the body holds anything besides whitespace.
    #[must_use]
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] if the body does not match `T`.
    pub fn json<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(Error::from)
    }
}

/// Sends resolved requests to the network.
///
/// Implementations must be safe to share between concurrent requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received (connection failure,
    /// timeout, unreadable body).
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// [`Transport`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport; the API key, when given, is attached to every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value, the CA certificate
    /// cannot be loaded, or the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, api_key: Option<&SecretString>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(api_key) = api_key {
            let mut value = HeaderValue::from_str(api_key.expose_secret()).map_err(|_| {
                Error::ConfigError("API key contains characters not allowed in headers".into())
            })?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let mut builder = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .connect_timeout(Duration::from_secs(10));

        if !config.enable_compression {
            builder = builder.no_gzip();
        }

        if !config.tls_verify {
            warn!("TLS verification disabled for Network as Code transport");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_cert) = &config.tls_ca_cert {
            debug!("loading CA certificate from {}", ca_cert.display());
            let bytes = std::fs::read(ca_cert).map_err(|err| {
                Error::ConfigError(format!(
                    "Failed to read CA certificate {}: {err}",
                    ca_cert.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&bytes)
                .map_err(|err| Error::ConfigError(format!("Invalid CA certificate: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        let mut builder = self.http.request(method, url);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(payload) = &body {
            builder = builder.json(payload);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}

/// Builder for [`ServiceClient`].
pub struct ServiceClientBuilder {
    service: NacService,
    base_url: Url,
    host: String,
    timeout: Duration,
    http_config: ClientConfig,
    token: Option<SecretString>,
    transport: Option<Arc<dyn Transport>>,
}

impl ServiceClientBuilder {
    /// Create a builder for the given service and base URL.
    ///
    /// The routing host defaults to the production host of the service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the URL cannot be parsed.
    pub fn new(service: NacService, base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(service, base_url.as_ref())?;

        Ok(Self {
            service,
            base_url,
            host: service.default_host(crate::types::Environment::Production),
            timeout,
            http_config: ClientConfig::new().with_timeout(timeout),
            token: None,
            transport: None,
        })
    }

    /// Create a builder from the endpoint resolved by a client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured endpoint is invalid.
    pub fn from_config(service: NacService, config: &NacClientConfig) -> Result<Self> {
        let resolved = config.resolve(service)?;
        let mut builder = Self::new(service, resolved.url.as_str(), resolved.timeout)?;
        builder.host = resolved.host;
        builder.http_config = ClientConfig::from_nac_config(config).with_timeout(resolved.timeout);
        Ok(builder)
    }

    /// Override the routing host header value.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.timeout = config.timeout;
        self.http_config = config;
        self
    }

    /// Configure the API key.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Use an existing transport instead of building a reqwest one.
    ///
    /// The transport is responsible for authentication; a token set on this builder
    /// is ignored.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be constructed.
    pub fn build(self) -> Result<ServiceClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.http_config, self.token.as_ref())?),
        };

        Ok(ServiceClient {
            service: self.service,
            base_url: self.base_url,
            host: self.host,
            timeout: self.timeout,
            transport,
        })
    }
}

fn parse_base_url(service: NacService, base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|err| Error::ConfigError(format!("Invalid {service} base URL `{base_url}`: {err}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Client for one remote API sharing a [`Transport`].
#[derive(Clone)]
pub struct ServiceClient {
    service: NacService,
    base_url: Url,
    host: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("service", &self.service)
            .field("base_url", &self.base_url.as_str())
            .field("host", &self.host)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ServiceClient {
    /// Service this client talks to.
    #[must_use]
    pub const fn service(&self) -> NacService {
        self.service
    }

    /// Base URL requests are joined onto.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Routing host header value.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    fn build_url(&self, segments: &[&str], params: &[(&'static str, String)]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|segment| matches!(**segment, "" | "." | "..")) {
            return Err(Error::ValidationError(format!(
                "Invalid {} path segment `{bad}`",
                self.service
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::InvalidEndpoint(format!(
                    "{} base URL `{}` cannot carry a path",
                    self.service, self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments.iter().copied());
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Send a request and return the successful response.
    ///
    /// `path` lists the segments below the base URL. Each segment is percent-encoded, so
    /// a caller-supplied name or ID never adds segments, a query or a fragment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] for an empty, `.` or `..` segment, the transport
    /// error, or the error matching a non-2xx status.
    pub async fn execute<B>(
        &self,
        method: Method,
        path: &[&str],
        body: Option<&B>,
        params: &[(&'static str, String)],
    ) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = self.build_url(path, params)?;
        let path = path.join("/");
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|err| {
                Error::ValidationError(format!("Failed to encode request body for `{path}`: {err}"))
            })?;

        info!(service = %self.service, %method, %path, "Network as Code request");

        let request = ApiRequest {
            method,
            url,
            headers: vec![(HOST_HEADER, self.host.clone())],
            body,
            timeout: Some(self.timeout),
        };
        let response = self.transport.send(request).await?;

        debug!(
            service = %self.service,
            status = %response.status,
            bytes = response.body.len(),
            "Network as Code response"
        );

        if response.is_success() {
            return Ok(response);
        }

        let err = map_status_to_error(self.service, response.status, response.body);
        if err.should_log() {
            warn!(
                service = %self.service,
                %path,
                code = err.error_code(),
                "Network as Code request failed: {err}"
            );
        } else {
            debug!(
                service = %self.service,
                %path,
                code = err.error_code(),
                "Network as Code request rejected: {err}"
            );
        }
        Err(err)
    }

    /// Send a request and parse the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns the request error, or [`Error::ParseError`] for an unexpected body.
    pub async fn send_json<B, R>(
        &self,
        method: Method,
        path: &[&str],
        body: Option<&B>,
        params: &[(&'static str, String)],
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.execute(method, path, body, params).await?;
        self.parse(path, &response)
    }

    /// Like [`send_json`](Self::send_json), but an empty body yields `None`.
    ///
    /// # Errors
    ///
    /// Returns the request error, or [`Error::ParseError`] for an unexpected body.
    pub async fn send_json_opt<B, R>(
        &self,
        method: Method,
        path: &[&str],
        body: Option<&B>,
        params: &[(&'static str, String)],
    ) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.execute(method, path, body, params).await?;
        if response.has_body() {
            self.parse(path, &response).map(Some)
        } else {
            Ok(None)
        }
    }

    /// `GET` a resource and parse its JSON body.
    ///
    /// # Errors
    ///
    /// Returns the request error, or [`Error::ParseError`] for an unexpected body.
    pub async fn get_json<R>(&self, path: &[&str], params: &[(&'static str, String)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.send_json::<(), R>(Method::GET, path, None, params)
            .await
    }

    fn parse<R>(&self, path: &[&str], response: &ApiResponse) -> Result<R>
    where
        R: DeserializeOwned,
    {
        response.json::<R>().map_err(|err| {
            Error::ParseError(format!(
                "Failed to parse {} response for `{}`: {err}",
                self.service,
                path.join("/")
            ))
        })
    }
}

/// Map a non-2xx status and its body to the error taxonomy.
#[must_use]
pub fn map_status_to_error(service: NacService, status: StatusCode, text: String) -> Error {
    let text = if text.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string()
    } else {
        text
    };

    match status {
        StatusCode::NOT_FOUND => Error::NotFound(format!("{service}: {text}")),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::Unauthorized(format!("{service} authentication failed: {text}"))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Error::BadRequest(format!("{service} rejected the request: {text}"))
        }
        StatusCode::CONFLICT => Error::Conflict(format!("{service}: {text}")),
        StatusCode::TOO_MANY_REQUESTS => {
            Error::RateLimited(format!("{service} rate limit exceeded: {text}"))
        }
        status if status.is_server_error() => {
            Error::ServerError(format!("{service} server error {status}: {text}"))
        }
        _ => Error::HttpError(format!("{service} error {status}: {text}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Echo {
        id: String,
    }

    fn mock_client(transport: MockTransport) -> ServiceClient {
        ServiceClientBuilder::new(
            NacService::QualityOfService,
            "https://qod.example.com",
            Duration::from_secs(5),
        )
        .unwrap()
        .with_transport(Arc::new(transport))
        .build()
        .unwrap()
    }

    #[test]
    fn test_client_config_new() {
        let config = ClientConfig::new();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.pool_max_idle_per_host, DEFAULT_POOL_MAX_IDLE_PER_HOST);
        assert!(config.enable_compression);
        assert!(config.tls_verify);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(60))
            .with_pool_idle_timeout(Duration::from_secs(120))
            .with_pool_max_idle(20)
            .with_compression(false)
            .with_tls_verify(false);

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(120));
        assert_eq!(config.pool_max_idle_per_host, 20);
        assert!(!config.enable_compression);
        assert!(!config.tls_verify);
    }

    #[test]
    fn test_default_timeouts() {
        assert_eq!(
            default_timeout(NacService::LocationVerification),
            Duration::from_secs(LOCATION_DEFAULT_TIMEOUT)
        );
        assert_eq!(
            default_timeout(NacService::NetworkSlicing),
            Duration::from_secs(SLICING_DEFAULT_TIMEOUT)
        );
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url(NacService::QualityOfService, "https://api.example.com/qod/v0")
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/qod/v0/");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ServiceClientBuilder::new(
            NacService::NetworkSlicing,
            "not a url",
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_map_status_to_error() {
        let service = NacService::QualityOfService;
        assert!(matches!(
            map_status_to_error(service, StatusCode::NOT_FOUND, "missing".into()),
            Error::NotFound(_)
        ));
        assert!(matches!(
            map_status_to_error(service, StatusCode::FORBIDDEN, "Invalid API key.".into()),
            Error::Unauthorized(_)
        ));
        assert!(matches!(
            map_status_to_error(service, StatusCode::UNAUTHORIZED, String::new()),
            Error::Unauthorized(_)
        ));
        assert!(matches!(
            map_status_to_error(service, StatusCode::CONFLICT, "state".into()),
            Error::Conflict(_)
        ));
        assert!(matches!(
            map_status_to_error(service, StatusCode::TOO_MANY_REQUESTS, "slow down".into()),
            Error::RateLimited(_)
        ));
        assert!(matches!(
            map_status_to_error(service, StatusCode::BAD_GATEWAY, "upstream".into()),
            Error::ServerError(_)
        ));
        assert!(matches!(
            map_status_to_error(service, StatusCode::IM_A_TEAPOT, "tea".into()),
            Error::HttpError(_)
        ));
    }

    #[test]
    fn test_empty_error_body_uses_reason() {
        let err = map_status_to_error(
            NacService::NetworkSlicing,
            StatusCode::NOT_FOUND,
            "  ".into(),
        );
        assert_eq!(err.to_string(), "Not found: network-slicing: Not Found");
    }

    #[tokio::test]
    async fn test_request_carries_host_and_query() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.method == Method::GET
                    && request.url.path() == "/sessions"
                    && request.url.query() == Some("networkAccessIdentifier=user%40example.net")
                    && request.header(HOST_HEADER)
                        == Some("quality-of-service-on-demand.nokia.rapidapi.com")
                    && request.body.is_none()
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::new(StatusCode::OK, r#"[{"id": "1"}]"#)));

        let client = mock_client(transport);
        let echoed: Vec<Echo> = client
            .get_json(
                &["sessions"],
                &[("networkAccessIdentifier", "user@example.net".to_string())],
            )
            .await
            .unwrap();
        assert_eq!(echoed, vec![Echo { id: "1".into() }]);
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(ApiResponse::new(StatusCode::OK, "<html>")));

        let client = mock_client(transport);
        let err = client.get_json::<Echo>(&["sessions", "1"], &[]).await.unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[tokio::test]
    async fn test_empty_body_is_none() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| request.method == Method::DELETE)
            .returning(|_| Ok(ApiResponse::new(StatusCode::NO_CONTENT, "")));

        let client = mock_client(transport);
        let result: Option<Echo> = client
            .send_json_opt::<(), _>(Method::DELETE, &["sessions", "1"], None, &[])
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(Error::ServiceUnavailable("connection refused".into())));

        let client = mock_client(transport);
        let err = client.get_json::<Echo>(&["sessions", "1"], &[]).await.unwrap_err();
        assert!(matches!(err, Error::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_path_segments_are_escaped() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.url.path() == "/slices/team%231%3Fx"
                    && request.url.query().is_none()
                    && request.url.fragment().is_none()
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::new(StatusCode::OK, r#"{"id": "1"}"#)));
        transport
            .expect_send()
            .withf(|request| request.url.path() == "/slices/a%2F..%2F..%2Fsessions%2F1234")
            .times(1)
            .returning(|_| Ok(ApiResponse::new(StatusCode::OK, r#"{"id": "2"}"#)));

        let client = mock_client(transport);
        let first: Echo = client.get_json(&["slices", "team#1?x"], &[]).await.unwrap();
        assert_eq!(first.id, "1");
        let second: Echo = client
            .get_json(&["slices", "a/../../sessions/1234"], &[])
            .await
            .unwrap();
        assert_eq!(second.id, "2");
    }

    #[tokio::test]
    async fn test_dot_segments_never_reach_transport() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);

        let client = mock_client(transport);
        for name in ["..", ".", ""] {
            let err = client
                .get_json::<Echo>(&["slices", name], &[])
                .await
                .unwrap_err();
            assert!(matches!(err, Error::ValidationError(_)), "{name:?}");
        }
    }

    #[tokio::test]
    async fn test_base_path_is_kept() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| request.url.as_str() == "https://api.example.com/qod/v0/sessions/7")
            .times(1)
            .returning(|_| Ok(ApiResponse::new(StatusCode::OK, r#"{"id": "7"}"#)));

        let client = ServiceClientBuilder::new(
            NacService::QualityOfService,
            "https://api.example.com/qod/v0",
            Duration::from_secs(5),
        )
        .unwrap()
        .with_transport(Arc::new(transport))
        .build()
        .unwrap();
        let echoed: Echo = client.get_json(&["sessions", "7"], &[]).await.unwrap();
        assert_eq!(echoed.id, "7");
    }

    #[tokio::test]
    async fn test_http_transport_sends_api_key_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sessions"))
            .and(header(API_KEY_HEADER, "TEST_TOKEN"))
            .and(header(HOST_HEADER, "qod.test"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "qosProfile": "QOS_L" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "abc" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ServiceClientBuilder::new(
            NacService::QualityOfService,
            server.uri(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_host("qod.test")
        .with_token("TEST_TOKEN")
        .build()
        .unwrap();

        let echoed: Echo = client
            .send_json(
                Method::POST,
                &["sessions"],
                Some(&json!({ "qosProfile": "QOS_L" })),
                &[],
            )
            .await
            .unwrap();
        assert_eq!(echoed.id, "abc");
    }

    #[tokio::test]
    async fn test_http_transport_maps_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sessions/1234"))
            .and(query_param("unused", "1"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({ "message": "Invalid API key." })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ServiceClientBuilder::new(
            NacService::QualityOfService,
            server.uri(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_token("BAD_TOKEN")
        .build()
        .unwrap();

        let err = client
            .get_json::<Echo>(&["sessions", "1234"], &[("unused", "1".to_string())])
            .await
            .unwrap_err();
        assert!(err.is_auth_error());
        assert!(err.to_string().contains("Invalid API key."));
    }
}
