//! Slicing models shared by the client and its callers.

use serde::{Deserialize, Serialize};

/// Mobile network a slice is provisioned in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkIdentifier {
    /// Mobile country code.
    pub mcc: String,
    /// Mobile network code.
    pub mnc: String,
}

impl NetworkIdentifier {
    /// Create a network identifier.
    #[must_use]
    pub fn new(mcc: impl Into<String>, mnc: impl Into<String>) -> Self {
        Self {
            mcc: mcc.into(),
            mnc: mnc.into(),
        }
    }
}

/// Slice/service type and differentiator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SliceInfo {
    /// Slice/service type (e.g. `eMBB`, `URLLC`, `MIoT`).
    pub service_type: String,
    /// Slice differentiator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub differentiator: Option<String>,
}

impl SliceInfo {
    /// Create slice info with a differentiator.
    #[must_use]
    pub fn new(service_type: impl Into<String>, differentiator: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            differentiator: Some(differentiator.into()),
        }
    }
}

/// Polygon vertex. Serialized as `{ "lat", "lon" }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    /// Latitude in degrees.
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in degrees.
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Area a slice serves, as an ordered polygon.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AreaOfService {
    /// Polygon vertices in order.
    pub polygon: Vec<Point>,
}

/// Guaranteed/maximum throughput pair.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Throughput {
    /// Guaranteed throughput.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guaranteed: Option<u64>,
    /// Maximum throughput.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<u64>,
}

impl Throughput {
    /// Create a throughput pair with both values set.
    #[must_use]
    pub const fn new(guaranteed: u64, maximum: u64) -> Self {
        Self {
            guaranteed: Some(guaranteed),
            maximum: Some(maximum),
        }
    }
}

/// Slice attributes, sent on creation and echoed by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SliceData {
    /// Client-chosen slice name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Network the slice lives in.
    pub network_identifier: NetworkIdentifier,
    /// Slice/service type.
    pub slice_info: SliceInfo,
    /// Area of service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_of_service: Option<AreaOfService>,
    /// Maximum number of data connections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_data_connections: Option<u32>,
    /// Maximum number of devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_devices: Option<u32>,
    /// Slice-level downlink throughput.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice_downlink_throughput: Option<Throughput>,
    /// Slice-level uplink throughput.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice_uplink_throughput: Option<Throughput>,
    /// Per-device downlink throughput.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_downlink_throughput: Option<Throughput>,
    /// Per-device uplink throughput.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_uplink_throughput: Option<Throughput>,
    /// Callback URL for slice notifications.
    #[serde(default)]
    pub notification_url: String,
    /// Token sent with slice notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_auth_token: Option<String>,
}

/// Server-side lifecycle state of a slice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SliceState {
    /// Being provisioned.
    Pending,
    /// Provisioned, not carrying traffic.
    Available,
    /// Active.
    Operating,
    /// Removed; terminal.
    Deleted,
}

impl SliceState {
    /// Returns the wire name of the state.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Available => "AVAILABLE",
            Self::Operating => "OPERATING",
            Self::Deleted => "DELETED",
        }
    }

    /// Returns true for the terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

impl std::fmt::Display for SliceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Representation of a slice as returned by the slicing API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SliceResponse {
    /// Slice attributes.
    pub slice: SliceData,
    /// Server-issued slice ID.
    #[serde(rename = "csi_id", default, skip_serializing_if = "Option::is_none")]
    pub csi_id: Option<String>,
    /// Current state.
    pub state: SliceState,
    /// Epoch seconds after which polling the state is meaningful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_polling_at: Option<i64>,
}

/// Minimal view of an action response; only the state is read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SliceStateResponse {
    /// State echoed by the server, if any.
    #[serde(default)]
    pub state: Option<SliceState>,
}
