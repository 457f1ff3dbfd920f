use chrono::{DateTime, Utc};
use nac_core::types::DeviceIdentifier;
use nac_core::Result;
use nac_qod::{ApplicationServer, CreateSessionRequest, PortsSpec, QodClient, SessionInfo};
use tracing::debug;

/// Parameters of a new quality-of-service session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSessionOptions {
    /// QoS profile (e.g. `QOS_L`).
    pub profile: String,
    /// IPv4 address of the application server.
    pub service_ipv4: Option<String>,
    /// IPv6 address of the application server.
    pub service_ipv6: Option<String>,
    /// Device ports the session applies to.
    pub device_ports: Option<PortsSpec>,
    /// Application server ports the session applies to.
    pub service_ports: Option<PortsSpec>,
    /// Requested duration in seconds.
    pub duration: Option<u32>,
    /// Callback URL for session notifications.
    pub notification_url: Option<String>,
    /// Token sent with session notifications.
    pub notification_auth_token: Option<String>,
}

impl CreateSessionOptions {
    /// Options for the given profile; add an application server address before use.
    #[must_use]
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            ..Self::default()
        }
    }

    /// Set the application server IPv4 address.
    #[must_use]
    pub fn with_service_ipv4(mut self, address: impl Into<String>) -> Self {
        self.service_ipv4 = Some(address.into());
        self
    }

    /// Set the application server IPv6 address.
    #[must_use]
    pub fn with_service_ipv6(mut self, address: impl Into<String>) -> Self {
        self.service_ipv6 = Some(address.into());
        self
    }

    /// Restrict the session to device ports.
    #[must_use]
    pub fn with_device_ports(mut self, ports: PortsSpec) -> Self {
        self.device_ports = Some(ports);
        self
    }

    /// Restrict the session to application server ports.
    #[must_use]
    pub fn with_service_ports(mut self, ports: PortsSpec) -> Self {
        self.service_ports = Some(ports);
        self
    }

    /// Request a duration in seconds.
    #[must_use]
    pub const fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Receive notifications at the given URL, optionally authenticated with a token.
    #[must_use]
    pub fn with_notification(mut self, url: impl Into<String>, auth_token: Option<String>) -> Self {
        self.notification_url = Some(url.into());
        self.notification_auth_token = auth_token;
        self
    }

    pub(crate) fn into_request(self, device: DeviceIdentifier) -> CreateSessionRequest {
        CreateSessionRequest {
            qos_profile: self.profile,
            device,
            application_server: ApplicationServer {
                ipv4_address: self.service_ipv4,
                ipv6_address: self.service_ipv6,
            },
            device_ports: self.device_ports,
            application_server_ports: self.service_ports,
            duration: self.duration,
            notification_url: self.notification_url,
            notification_auth_token: self.notification_auth_token,
        }
    }
}

/// A quality-of-service session.
///
/// Fields reflect the last response received; call [`refresh`](Self::refresh) to update
/// them.
#[derive(Debug, Clone)]
pub struct QodSession {
    info: SessionInfo,
    client: QodClient,
}

impl QodSession {
    pub(crate) const fn from_info(info: SessionInfo, client: QodClient) -> Self {
        Self { info, client }
    }

    /// Server-issued session ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.info.session_id
    }

    /// QoS profile.
    #[must_use]
    pub fn profile(&self) -> &str {
        &self.info.qos_profile
    }

    /// Last known status (e.g. `REQUESTED`, `AVAILABLE`).
    #[must_use]
    pub fn status(&self) -> &str {
        &self.info.qos_status
    }

    /// Reason for the current status, if given.
    #[must_use]
    pub fn status_info(&self) -> Option<&str> {
        self.info.status_info.as_deref()
    }

    /// Start of the session.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.info.started_at
    }

    /// Expiry of the session.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.info.expires_at
    }

    /// Seconds between start and expiry; may be zero or negative.
    ///
    /// `None` while either timestamp is unknown.
    #[must_use]
    pub fn duration(&self) -> Option<i64> {
        match (self.info.started_at, self.info.expires_at) {
            (Some(started), Some(expires)) => Some((expires - started).num_seconds()),
            _ => None,
        }
    }

    /// Device the session was created for, when echoed by the server.
    #[must_use]
    pub const fn device(&self) -> Option<&DeviceIdentifier> {
        self.info.device.as_ref()
    }

    /// Application server addresses, when echoed by the server.
    #[must_use]
    pub const fn application_server(&self) -> Option<&ApplicationServer> {
        self.info.application_server.as_ref()
    }

    /// Device ports, when set.
    #[must_use]
    pub const fn device_ports(&self) -> Option<&PortsSpec> {
        self.info.device_ports.as_ref()
    }

    /// Application server ports, when set.
    #[must_use]
    pub const fn service_ports(&self) -> Option<&PortsSpec> {
        self.info.application_server_ports.as_ref()
    }

    /// Callback URL for notifications, when set.
    #[must_use]
    pub fn notification_url(&self) -> Option<&str> {
        self.info.notification_url.as_deref()
    }

    /// Re-fetch the session and overwrite every local field.
    ///
    /// On error the session is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the QoD API.
    pub async fn refresh(&mut self) -> Result<()> {
        let info = self.client.get_session(&self.info.session_id).await?;
        debug!(session = %info.session_id, status = %info.qos_status, "session refreshed");
        self.info = info;
        Ok(())
    }

    /// Delete the session on the server. The local snapshot is kept as is.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the QoD API.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete_session(&self.info.session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session(started_at: Option<i64>, expires_at: Option<i64>) -> QodSession {
        let info = SessionInfo {
            session_id: "1234".into(),
            qos_profile: "QOS_L".into(),
            qos_status: "REQUESTED".into(),
            started_at: started_at.map(|secs| Utc.timestamp_opt(secs, 0).unwrap()),
            expires_at: expires_at.map(|secs| Utc.timestamp_opt(secs, 0).unwrap()),
            device: None,
            application_server: None,
            device_ports: None,
            application_server_ports: None,
            duration: None,
            notification_url: None,
            status_info: None,
        };
        QodSession::from_info(info, QodClient::new("http://localhost:9").unwrap())
    }

    #[test]
    fn duration_is_difference_of_timestamps() {
        assert_eq!(
            session(Some(1_691_671_102), Some(1_691_757_502)).duration(),
            Some(86_400)
        );
    }

    #[test]
    fn duration_may_be_zero_or_negative() {
        assert_eq!(session(Some(100), Some(100)).duration(), Some(0));
        assert_eq!(session(Some(200), Some(100)).duration(), Some(-100));
    }

    #[test]
    fn duration_unknown_without_timestamps() {
        assert_eq!(session(None, Some(100)).duration(), None);
        assert_eq!(session(Some(100), None).duration(), None);
    }

    #[test]
    fn options_map_to_request() {
        let request = CreateSessionOptions::new("QOS_M")
            .with_service_ipv6("2001:db8::1")
            .with_service_ports(PortsSpec::default().with_port(443))
            .with_duration(3600)
            .with_notification("https://notify.me/here", Some("secret".into()))
            .into_request(DeviceIdentifier::new().with_ipv6_address("2001:db8::2"));

        assert_eq!(request.qos_profile, "QOS_M");
        assert!(request.application_server.ipv4_address.is_none());
        assert_eq!(
            request.application_server.ipv6_address.as_deref(),
            Some("2001:db8::1")
        );
        assert_eq!(request.application_server_ports.unwrap().ports, vec![443]);
        assert_eq!(request.duration, Some(3600));
        assert_eq!(request.notification_auth_token.as_deref(), Some("secret"));
    }
}
