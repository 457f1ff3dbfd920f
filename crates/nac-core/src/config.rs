//! Configuration structures for Network as Code clients.
//!
//! This module provides the top-level client configuration (environment, timeouts,
//! TLS) and per-service endpoint overrides, with validation.

use crate::types::{Environment, NacService};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Environment variable selecting the deployment environment.
pub const ENV_ENVIRONMENT: &str = "NAC_ENVIRONMENT";
/// Environment variable overriding the request timeout (seconds).
pub const ENV_TIMEOUT_SECS: &str = "NAC_TIMEOUT_SECS";

/// Configuration for a Network as Code client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NacClientConfig {
    /// Deployment environment (selects default endpoints)
    #[serde(default)]
    pub environment: Environment,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<std::path::PathBuf>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Per-service endpoint overrides
    #[validate(nested)]
    #[serde(default)]
    pub endpoints: ServiceEndpoints,
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl NacClientConfig {
    /// Create a configuration for the given environment with default settings.
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Build a configuration from `NAC_ENVIRONMENT` and `NAC_TIMEOUT_SECS`.
    ///
    /// Unset variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparsable value or validation fails.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();

        if let Ok(environment) = std::env::var(ENV_ENVIRONMENT) {
            config.environment = environment.parse()?;
        }

        if let Ok(timeout) = std::env::var(ENV_TIMEOUT_SECS) {
            config.request_timeout_secs = timeout.parse().map_err(|err| {
                Error::ConfigError(format!("Invalid {ENV_TIMEOUT_SECS} `{timeout}`: {err}"))
            })?;
        }

        config.ensure_valid()?;
        Ok(config)
    }

    /// Switch to the development environment.
    #[must_use]
    pub const fn dev_mode(mut self) -> Self {
        self.environment = Environment::Development;
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: std::path::PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set endpoint overrides.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: ServiceEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid field.
    pub fn ensure_valid(&self) -> Result<(), Error> {
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))
    }

    /// Resolve the base URL and routing host for a service.
    ///
    /// Overrides win over the environment defaults; an override without a host keeps
    /// the default host.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved URL cannot be parsed.
    pub fn resolve(&self, service: NacService) -> Result<ResolvedEndpoint, Error> {
        let endpoint = self.endpoints.get(service);

        let url = match endpoint {
            Some(endpoint) => endpoint.parse_url()?,
            None => Url::parse(&service.default_base_url(self.environment))
                .map_err(|e| Error::ConfigError(format!("Invalid {service} URL: {e}")))?,
        };
        let host = endpoint
            .and_then(|endpoint| endpoint.host.clone())
            .unwrap_or_else(|| service.default_host(self.environment));
        let timeout = endpoint
            .and_then(ServiceEndpointConfig::timeout)
            .unwrap_or_else(|| self.timeout());

        Ok(ResolvedEndpoint { url, host, timeout })
    }
}

impl Default for NacClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
            endpoints: ServiceEndpoints::default(),
        }
    }
}

/// Endpoint of one service after applying overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    /// Base URL requests are joined onto
    pub url: Url,
    /// Routing host header value
    pub host: String,
    /// Request timeout
    pub timeout: Duration,
}

/// Static service endpoint overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ServiceEndpoints {
    /// Location retrieval endpoint
    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_retrieval: Option<ServiceEndpointConfig>,

    /// Location verification endpoint
    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_verification: Option<ServiceEndpointConfig>,

    /// Quality-of-service-on-demand endpoint
    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_of_service: Option<ServiceEndpointConfig>,

    /// Network slicing endpoint
    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_slicing: Option<ServiceEndpointConfig>,
}

impl ServiceEndpoints {
    /// Create a new empty service endpoints collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            location_retrieval: None,
            location_verification: None,
            quality_of_service: None,
            network_slicing: None,
        }
    }

    /// Set the override for a service.
    #[must_use]
    pub fn with(mut self, service: NacService, endpoint: ServiceEndpointConfig) -> Self {
        match service {
            NacService::LocationRetrieval => self.location_retrieval = Some(endpoint),
            NacService::LocationVerification => self.location_verification = Some(endpoint),
            NacService::QualityOfService => self.quality_of_service = Some(endpoint),
            NacService::NetworkSlicing => self.network_slicing = Some(endpoint),
        }
        self
    }

    /// Point every service at the same base URL (useful for gateways and test servers).
    #[must_use]
    pub fn all_at(endpoint: &ServiceEndpointConfig) -> Self {
        NacService::all()
            .iter()
            .fold(Self::new(), |endpoints, service| {
                endpoints.with(*service, endpoint.clone())
            })
    }

    /// Get the override for a service, if any.
    #[must_use]
    pub const fn get(&self, service: NacService) -> Option<&ServiceEndpointConfig> {
        match service {
            NacService::LocationRetrieval => self.location_retrieval.as_ref(),
            NacService::LocationVerification => self.location_verification.as_ref(),
            NacService::QualityOfService => self.quality_of_service.as_ref(),
            NacService::NetworkSlicing => self.network_slicing.as_ref(),
        }
    }
}

/// Configuration for a single service endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServiceEndpointConfig {
    /// Service base URL
    #[validate(url)]
    pub url: String,

    /// Optional routing host override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Optional timeout override for this service (in seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 300))]
    pub timeout_override_secs: Option<u64>,
}

impl ServiceEndpointConfig {
    /// Create a new service endpoint configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            url: url.into(),
            host: None,
            timeout_override_secs: None,
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid endpoint configuration: {e}")))?;

        Ok(config)
    }

    /// Set the routing host override.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set timeout override in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_override_secs = Some(seconds);
        self
    }

    /// Get the timeout as a Duration, if set.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_override_secs.map(Duration::from_secs)
    }

    /// Parse and validate the URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_url(&self) -> Result<Url, Error> {
        Url::parse(&self.url).map_err(|e| Error::ConfigError(format!("Invalid service URL: {e}")))
    }
}
