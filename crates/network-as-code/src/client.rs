//! Top-level client and its builder.

use crate::namespaces::{Devices, Sessions, Slices};
use nac_core::client::{ClientConfig, HttpTransport, Transport};
use nac_core::config::NacClientConfig;
use nac_core::types::Environment;
use nac_core::{Error, Result};
use nac_location::{LocationClient, LocationClientBuilder};
use nac_qod::{QodClient, QodClientBuilder};
use nac_slicing::{SlicingClient, SlicingClientBuilder};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::info;

/// Environment variable holding the API token read by [`NetworkAsCodeClient::from_env`].
pub const ENV_TOKEN: &str = "NAC_TOKEN";

/// Builder for [`NetworkAsCodeClient`].
pub struct NetworkAsCodeClientBuilder {
    token: SecretString,
    config: NacClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl NetworkAsCodeClientBuilder {
    /// Start from the production defaults.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            config: NacClientConfig::default(),
            transport: None,
        }
    }

    /// Select the deployment environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    /// Talk to the development environment.
    #[must_use]
    pub fn dev_mode(self) -> Self {
        self.with_environment(Environment::Development)
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: NacClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Send every request through the given transport.
    ///
    /// The transport is responsible for authentication; the token is not attached.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] for an invalid configuration or when the HTTP
    /// transport cannot be built.
    pub fn build(self) -> Result<NetworkAsCodeClient> {
        self.config.ensure_valid()?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(
                &ClientConfig::from_nac_config(&self.config),
                Some(&self.token),
            )?),
        };

        let location = LocationClientBuilder::from_config(&self.config)?
            .with_transport(Arc::clone(&transport))
            .build()?;
        let qod = QodClientBuilder::from_config(&self.config)?
            .with_transport(Arc::clone(&transport))
            .build()?;
        let slicing = SlicingClientBuilder::from_config(&self.config)?
            .with_transport(transport)
            .build()?;

        info!(environment = %self.config.environment, "Network as Code client ready");

        Ok(NetworkAsCodeClient {
            environment: self.config.environment,
            location,
            qod,
            slicing,
        })
    }
}

/// Entry point to the Network as Code APIs.
///
/// Cheap to clone; all clones share one transport and credential. Safe to use from
/// concurrent tasks.
#[derive(Debug, Clone)]
pub struct NetworkAsCodeClient {
    environment: Environment,
    location: LocationClient,
    qod: QodClient,
    slicing: SlicingClient,
}

impl NetworkAsCodeClient {
    /// Create a production client authenticated with the given token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder(token).build()
    }

    /// Start configuring a client.
    pub fn builder(token: impl Into<String>) -> NetworkAsCodeClientBuilder {
        NetworkAsCodeClientBuilder::new(token)
    }

    /// Create a client from `NAC_TOKEN`, `NAC_ENVIRONMENT` and `NAC_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if `NAC_TOKEN` is unset or another variable is invalid.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(ENV_TOKEN)
            .map_err(|_| Error::ConfigError(format!("{ENV_TOKEN} is not set")))?;
        let config = NacClientConfig::from_env()?;
        Self::builder(token).with_config(config).build()
    }

    /// Environment this client talks to.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Device operations.
    #[must_use]
    pub fn devices(&self) -> Devices<'_> {
        Devices::new(&self.location, &self.qod)
    }

    /// Quality-of-service session operations.
    #[must_use]
    pub fn sessions(&self) -> Sessions<'_> {
        Sessions::new(&self.qod)
    }

    /// Network slice operations.
    #[must_use]
    pub fn slices(&self) -> Slices<'_> {
        Slices::new(&self.slicing)
    }
}
