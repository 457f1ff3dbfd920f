use super::{CreateSessionOptions, Location, QodSession};
use nac_core::types::{DeviceIdentifier, DeviceIpv4Addr};
use nac_core::{Error, Result};
use nac_location::{Area, LocationClient, DEFAULT_MAX_AGE};
use nac_qod::{QodClient, SessionListParams};
use tracing::{debug, info};

/// A device on the network, described locally.
///
/// Obtained from [`Devices::get`](crate::Devices::get); holding one costs no request.
#[derive(Debug, Clone)]
pub struct Device {
    identifier: DeviceIdentifier,
    location: LocationClient,
    qod: QodClient,
}

impl Device {
    pub(crate) const fn new(
        identifier: DeviceIdentifier,
        location: LocationClient,
        qod: QodClient,
    ) -> Self {
        Self {
            identifier,
            location,
            qod,
        }
    }

    /// Wire identifier of the device.
    #[must_use]
    pub const fn identifier(&self) -> &DeviceIdentifier {
        &self.identifier
    }

    /// Network access identifier, if known.
    #[must_use]
    pub fn network_access_identifier(&self) -> Option<&str> {
        self.identifier.network_access_identifier.as_deref()
    }

    /// IPv4 addressing, if known.
    #[must_use]
    pub const fn ipv4_address(&self) -> Option<&DeviceIpv4Addr> {
        self.identifier.ipv4_address.as_ref()
    }

    /// IPv6 address, if known.
    #[must_use]
    pub fn ipv6_address(&self) -> Option<&str> {
        self.identifier.ipv6_address.as_deref()
    }

    /// Phone number, if known.
    #[must_use]
    pub fn phone_number(&self) -> Option<&str> {
        self.identifier.phone_number.as_deref()
    }

    /// Retrieve the current location, accepting fixes up to 60 seconds old.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for a device unknown to the network, or the error
    /// reported by the location API.
    pub async fn get_location(&self) -> Result<Location> {
        self.get_location_with_max_age(DEFAULT_MAX_AGE).await
    }

    /// Retrieve the current location, accepting fixes up to `max_age` seconds old.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the location API.
    pub async fn get_location_with_max_age(&self, max_age: u32) -> Result<Location> {
        let response = self
            .location
            .retrieve_location(&self.identifier, max_age)
            .await?;
        Ok(Location::from(response))
    }

    /// Ask the network whether the device is within `radius` meters of a point.
    ///
    /// The answer comes from the server alone; only a `TRUE` verdict yields `true`.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the location API.
    pub async fn verify_location(
        &self,
        latitude: f64,
        longitude: f64,
        radius: u32,
        max_age: u32,
    ) -> Result<bool> {
        let response = self
            .location
            .verify_location(
                &self.identifier,
                Area::circle(latitude, longitude, radius),
                max_age,
            )
            .await?;
        Ok(response.is_verified())
    }

    /// Open a quality-of-service session towards an application server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] without sending anything when the device has no
    /// IP address or neither server address is given.
    pub async fn create_qod_session(
        &self,
        profile: &str,
        service_ipv4: Option<&str>,
        service_ipv6: Option<&str>,
    ) -> Result<QodSession> {
        let mut options = CreateSessionOptions::new(profile);
        options.service_ipv4 = service_ipv4.map(str::to_owned);
        options.service_ipv6 = service_ipv6.map(str::to_owned);
        self.create_qod_session_with(options).await
    }

    /// Open a quality-of-service session with ports, duration or notifications.
    ///
    /// # Errors
    ///
    /// Same as [`create_qod_session`](Self::create_qod_session).
    pub async fn create_qod_session_with(&self, options: CreateSessionOptions) -> Result<QodSession> {
        let request = options.into_request(self.identifier.clone());
        let info = self.qod.create_session(&request).await?;
        info!(session = %info.session_id, status = %info.qos_status, "QoD session created");
        Ok(QodSession::from_info(info, self.qod.clone()))
    }

    /// List the sessions of this device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] when the device has no network access
    /// identifier, or the error reported by the QoD API.
    pub async fn sessions(&self) -> Result<Vec<QodSession>> {
        let identifier = self.network_access_identifier().ok_or_else(|| {
            Error::ValidationError(
                "device must have a network access identifier to list its sessions".into(),
            )
        })?;

        let sessions = self
            .qod
            .list_sessions(&SessionListParams::for_device(identifier))
            .await?;
        Ok(sessions
            .into_iter()
            .map(|info| QodSession::from_info(info, self.qod.clone()))
            .collect())
    }

    /// Delete every session of this device.
    ///
    /// Stops at the first failing deletion.
    ///
    /// # Errors
    ///
    /// Same as [`sessions`](Self::sessions), plus any deletion error.
    pub async fn clear_sessions(&self) -> Result<()> {
        let sessions = self.sessions().await?;
        debug!(count = sessions.len(), "clearing QoD sessions");
        for session in sessions {
            session.delete().await?;
        }
        Ok(())
    }
}
