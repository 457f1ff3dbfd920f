//! Core Network as Code domain types.
//!
//! This module provides the service enumeration with its endpoint conventions and the
//! device identifier shared by the location and quality-of-service APIs.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use crate::error::{Error, Result};

/// Domain suffix of the regional API gateway.
pub const GATEWAY_DOMAIN: &str = "p-eu.rapidapi.com";
/// Routing host suffix for the production environment.
pub const PRODUCTION_HOST_SUFFIX: &str = "nokia.rapidapi.com";
/// Routing host suffix for the development environment.
pub const DEVELOPMENT_HOST_SUFFIX: &str = "nokia-dev.rapidapi.com";

/// Deployment environment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production APIs.
    #[default]
    Production,
    /// Development APIs ("dev mode").
    Development,
}

impl Environment {
    /// Returns the environment name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }

    /// Returns the suffix appended to API names to form routing hosts.
    #[must_use]
    pub const fn host_suffix(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_HOST_SUFFIX,
            Self::Development => DEVELOPMENT_HOST_SUFFIX,
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(Error::ConfigError(format!("Unknown environment: {s}"))),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Remote APIs reachable through Network as Code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NacService {
    /// Device location retrieval
    LocationRetrieval,
    /// Device location verification
    LocationVerification,
    /// Quality of service on demand
    QualityOfService,
    /// Network slicing
    NetworkSlicing,
}

impl NacService {
    /// Returns the service name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LocationRetrieval => "location-retrieval",
            Self::LocationVerification => "location-verification",
            Self::QualityOfService => "quality-of-service-on-demand",
            Self::NetworkSlicing => "network-slicing",
        }
    }

    /// Returns all available services.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::LocationRetrieval,
            Self::LocationVerification,
            Self::QualityOfService,
            Self::NetworkSlicing,
        ]
    }

    /// Name under which the API is published in the given environment.
    #[must_use]
    pub const fn api_name(&self, environment: Environment) -> &'static str {
        match (self, environment) {
            (Self::LocationRetrieval, Environment::Development) => "location-retrieval3",
            _ => self.name(),
        }
    }

    /// Default base URL of the API in the given environment.
    #[must_use]
    pub fn default_base_url(&self, environment: Environment) -> String {
        format!("https://{}.{GATEWAY_DOMAIN}", self.api_name(environment))
    }

    /// Default routing host (`X-RapidAPI-Host`) of the API in the given environment.
    #[must_use]
    pub fn default_host(&self, environment: Environment) -> String {
        format!(
            "{}.{}",
            self.api_name(environment),
            environment.host_suffix()
        )
    }
}

impl FromStr for NacService {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "location-retrieval" => Ok(Self::LocationRetrieval),
            "location-verification" => Ok(Self::LocationVerification),
            "quality-of-service-on-demand" | "qod" => Ok(Self::QualityOfService),
            "network-slicing" | "slicing" => Ok(Self::NetworkSlicing),
            _ => Err(Error::ConfigError(format!("Unknown service: {s}"))),
        }
    }
}

impl std::fmt::Display for NacService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// IPv4 addressing of a device, as seen from the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIpv4Addr {
    /// Public (NATed) address.
    pub public_address: String,
    /// Private address behind the NAT.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_address: Option<String>,
    /// Public port used by the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_port: Option<u16>,
}

impl DeviceIpv4Addr {
    /// Create an address with only the public part set.
    #[must_use]
    pub fn new(public_address: impl Into<String>) -> Self {
        Self {
            public_address: public_address.into(),
            private_address: None,
            public_port: None,
        }
    }

    /// Set the private address.
    #[must_use]
    pub fn with_private_address(mut self, address: impl Into<String>) -> Self {
        self.private_address = Some(address.into());
        self
    }

    /// Set the public port.
    #[must_use]
    pub const fn with_public_port(mut self, port: u16) -> Self {
        self.public_port = Some(port);
        self
    }
}

/// Identification of a device in request and response bodies.
///
/// Any combination of attributes may be given, but at least one must be present.
/// Absent attributes are left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_device_identifier"))]
pub struct DeviceIdentifier {
    /// Network access identifier (e.g. `user@operator.net`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_access_identifier: Option<String>,
    /// IPv4 addressing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<DeviceIpv4Addr>,
    /// IPv6 address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
    /// Phone number (MSISDN).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

fn validate_device_identifier(
    identifier: &DeviceIdentifier,
) -> std::result::Result<(), ValidationError> {
    if identifier.network_access_identifier.is_none()
        && identifier.ipv4_address.is_none()
        && identifier.ipv6_address.is_none()
        && identifier.phone_number.is_none()
    {
        let mut error = ValidationError::new("device_identifier");
        error.message = Some(Cow::Borrowed(
            "at least one of network access identifier, IPv4 address, IPv6 address or phone number must be provided",
        ));
        return Err(error);
    }
    Ok(())
}

impl DeviceIdentifier {
    /// Create an empty identifier; fill it with the `with_*` methods.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the network access identifier.
    #[must_use]
    pub fn with_network_access_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.network_access_identifier = Some(identifier.into());
        self
    }

    /// Set the IPv4 addressing.
    #[must_use]
    pub fn with_ipv4_address(mut self, address: DeviceIpv4Addr) -> Self {
        self.ipv4_address = Some(address);
        self
    }

    /// Set the IPv6 address.
    #[must_use]
    pub fn with_ipv6_address(mut self, address: impl Into<String>) -> Self {
        self.ipv6_address = Some(address.into());
        self
    }

    /// Set the phone number.
    #[must_use]
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Returns true if an IPv4 or IPv6 address is known.
    #[must_use]
    pub const fn has_ip_address(&self) -> bool {
        self.ipv4_address.is_some() || self.ipv6_address.is_some()
    }

    /// Check that at least one identifying attribute is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] when every attribute is absent.
    pub fn ensure_identifiable(&self) -> Result<()> {
        self.validate().map_err(Error::from)
    }
}
