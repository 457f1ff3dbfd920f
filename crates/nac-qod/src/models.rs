//! QoD models shared by the client and its callers.

use chrono::{DateTime, Utc};
use nac_core::types::DeviceIdentifier;
use serde::{Deserialize, Serialize};

/// Addresses of the application server the QoS applies to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationServer {
    /// IPv4 address or subnet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,
    /// IPv6 address or subnet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
}

impl ApplicationServer {
    /// Returns true if at least one address is set.
    #[must_use]
    pub const fn has_address(&self) -> bool {
        self.ipv4_address.is_some() || self.ipv6_address.is_some()
    }
}

/// Inclusive port range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortRange {
    /// First port.
    pub from: u16,
    /// Last port.
    pub to: u16,
}

/// Ports a session applies to, as ranges and/or single ports.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortsSpec {
    /// Port ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<PortRange>,
    /// Single ports.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<u16>,
}

impl PortsSpec {
    /// Add a range.
    #[must_use]
    pub fn with_range(mut self, from: u16, to: u16) -> Self {
        self.ranges.push(PortRange { from, to });
        self
    }

    /// Add a single port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.ports.push(port);
        self
    }
}

/// Body of `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Requested QoS profile (e.g. `QOS_L`).
    pub qos_profile: String,
    /// Device the session applies to.
    pub device: DeviceIdentifier,
    /// Application server the session applies to.
    pub application_server: ApplicationServer,
    /// Device ports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_ports: Option<PortsSpec>,
    /// Application server ports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_server_ports: Option<PortsSpec>,
    /// Requested session duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Callback URL for session notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    /// Token sent with session notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_auth_token: Option<String>,
}

/// Representation of a session as returned by the QoD API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// Server-issued session ID.
    pub session_id: String,
    /// QoS profile.
    pub qos_profile: String,
    /// Session status (e.g. `REQUESTED`, `AVAILABLE`, `UNAVAILABLE`).
    pub qos_status: String,
    /// Start of the session.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "epoch_seconds"
    )]
    pub started_at: Option<DateTime<Utc>>,
    /// Expiry of the session.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "epoch_seconds"
    )]
    pub expires_at: Option<DateTime<Utc>>,
    /// Device the session applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceIdentifier>,
    /// Application server the session applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_server: Option<ApplicationServer>,
    /// Device ports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_ports: Option<PortsSpec>,
    /// Application server ports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_server_ports: Option<PortsSpec>,
    /// Session duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Callback URL for session notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    /// Reason for the current status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_info: Option<String>,
}

/// Filters accepted by `GET /sessions`.
#[derive(Debug, Default, Clone)]
pub struct SessionListParams {
    /// Sessions of the device with this network access identifier.
    pub network_access_identifier: Option<String>,
}

impl SessionListParams {
    /// Filter by network access identifier.
    #[must_use]
    pub fn for_device(network_access_identifier: impl Into<String>) -> Self {
        Self {
            network_access_identifier: Some(network_access_identifier.into()),
        }
    }

    /// Convert the parameters into URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        self.network_access_identifier
            .iter()
            .map(|identifier| ("networkAccessIdentifier", identifier.clone()))
            .collect()
    }
}

/// Epoch-second timestamps. The QoD API sends whole or fractional seconds; both are
/// accepted and sub-second precision is kept.
mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const NANOS_PER_SEC: f64 = 1_000_000_000.0;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            None => serializer.serialize_none(),
            Some(time) if time.timestamp_subsec_nanos() == 0 => {
                serializer.serialize_i64(time.timestamp())
            }
            #[allow(clippy::cast_precision_loss)]
            Some(time) => serializer.serialize_f64(
                time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) / NANOS_PER_SEC,
            ),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<f64>::deserialize(deserializer)?
            .map(|seconds| {
                from_seconds(seconds).ok_or_else(|| {
                    de::Error::custom(format!("timestamp {seconds} is out of range"))
                })
            })
            .transpose()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_seconds(seconds: f64) -> Option<DateTime<Utc>> {
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * NANOS_PER_SEC).round() as u32;
        // rounding can carry a full second
        let (whole, nanos) = if nanos >= 1_000_000_000 {
            (whole + 1.0, 0)
        } else {
            (whole, nanos)
        };
        DateTime::from_timestamp(whole as i64, nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nac_core::types::DeviceIpv4Addr;
    use serde_json::json;

    #[test]
    fn create_request_matches_wire_format() {
        let request = CreateSessionRequest {
            qos_profile: "QOS_L".into(),
            device: DeviceIdentifier::new()
                .with_network_access_identifier("testuser@open5glab.net")
                .with_ipv4_address(
                    DeviceIpv4Addr::new("1.1.1.2")
                        .with_private_address("1.1.1.2")
                        .with_public_port(80),
                )
                .with_phone_number("9382948473"),
            application_server: ApplicationServer {
                ipv4_address: Some("5.6.7.8".into()),
                ipv6_address: None,
            },
            device_ports: None,
            application_server_ports: Some(PortsSpec::default().with_range(5000, 5010).with_port(80)),
            duration: None,
            notification_url: None,
            notification_auth_token: None,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "qosProfile": "QOS_L",
                "device": {
                    "ipv4Address": {
                        "publicAddress": "1.1.1.2",
                        "privateAddress": "1.1.1.2",
                        "publicPort": 80
                    },
                    "networkAccessIdentifier": "testuser@open5glab.net",
                    "phoneNumber": "9382948473"
                },
                "applicationServer": { "ipv4Address": "5.6.7.8" },
                "applicationServerPorts": {
                    "ranges": [{ "from": 5000, "to": 5010 }],
                    "ports": [80]
                }
            })
        );
    }

    #[test]
    fn session_info_parses_epoch_seconds() {
        let session: SessionInfo = serde_json::from_value(json!({
            "sessionId": "08305343-7ed2-43b7-8eda-4c5ae9805bd0",
            "qosProfile": "QOS_L",
            "qosStatus": "REQUESTED",
            "startedAt": 1691671102,
            "expiresAt": 1691757502
        }))
        .unwrap();

        assert_eq!(session.qos_status, "REQUESTED");
        assert_eq!(session.started_at.unwrap().timestamp(), 1_691_671_102);
        assert_eq!(session.expires_at.unwrap().timestamp(), 1_691_757_502);
        assert!(session.device.is_none());
    }

    #[test]
    fn session_info_without_timestamps() {
        let session: SessionInfo = serde_json::from_value(json!({
            "sessionId": "1",
            "qosProfile": "QOS_E",
            "qosStatus": "REQUESTED"
        }))
        .unwrap();
        assert!(session.started_at.is_none());
        assert!(session.expires_at.is_none());
    }

    #[test]
    fn list_params_skip_absent_filter() {
        assert!(SessionListParams::default().to_pairs().is_empty());
        assert_eq!(
            SessionListParams::for_device("a@b.net").to_pairs(),
            vec![("networkAccessIdentifier", "a@b.net".to_string())]
        );
    }

    #[test]
    fn session_info_keeps_fractional_seconds() {
        let session: SessionInfo = serde_json::from_value(json!({
            "sessionId": "1",
            "qosProfile": "QOS_L",
            "qosStatus": "REQUESTED",
            "startedAt": 1706745600.5,
            "expiresAt": 1706745660.25
        }))
        .unwrap();

        let started = session.started_at.unwrap();
        assert_eq!(started.timestamp(), 1_706_745_600);
        assert_eq!(started.timestamp_subsec_millis(), 500);
        assert_eq!(session.expires_at.unwrap().timestamp_subsec_millis(), 250);

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["startedAt"], json!(1706745600.5));
    }

    #[test]
    fn whole_seconds_serialize_as_integers() {
        let session: SessionInfo = serde_json::from_value(json!({
            "sessionId": "1",
            "qosProfile": "QOS_L",
            "qosStatus": "REQUESTED",
            "startedAt": 1691671102
        }))
        .unwrap();
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["startedAt"], json!(1691671102));
        assert!(value.get("expiresAt").is_none());
    }

    #[test]
    fn non_numeric_timestamp_is_rejected() {
        let result = serde_json::from_value::<SessionInfo>(json!({
            "sessionId": "1",
            "qosProfile": "QOS_L",
            "qosStatus": "REQUESTED",
            "startedAt": "yesterday"
        }));
        assert!(result.is_err());
    }
}
