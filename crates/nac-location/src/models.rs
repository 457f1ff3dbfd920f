//! Location API models.

use nac_core::types::DeviceIdentifier;
use serde::{Deserialize, Serialize};

/// Maximum age (seconds) of a location fix accepted by default.
pub const DEFAULT_MAX_AGE: u32 = 60;

/// Body of `POST /retrieve`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveLocationRequest {
    /// Device to locate.
    pub device: DeviceIdentifier,
    /// Maximum acceptable age of the location fix, in seconds.
    pub max_age: u32,
}

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// Structured postal address. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CivicAddress {
    /// Country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// National subdivision (state, region).
    #[serde(rename = "A1", alias = "a1", default, skip_serializing_if = "Option::is_none")]
    pub a1: Option<String>,
    /// County, parish or district.
    #[serde(rename = "A2", alias = "a2", default, skip_serializing_if = "Option::is_none")]
    pub a2: Option<String>,
    /// City or township.
    #[serde(rename = "A3", alias = "a3", default, skip_serializing_if = "Option::is_none")]
    pub a3: Option<String>,
    /// City division or borough.
    #[serde(rename = "A4", alias = "a4", default, skip_serializing_if = "Option::is_none")]
    pub a4: Option<String>,
    /// Neighbourhood or block.
    #[serde(rename = "A5", alias = "a5", default, skip_serializing_if = "Option::is_none")]
    pub a5: Option<String>,
    /// Street.
    #[serde(rename = "A6", alias = "a6", default, skip_serializing_if = "Option::is_none")]
    pub a6: Option<String>,
}

/// Response of `POST /retrieve`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    /// Location of the device.
    pub point: Point,
    /// Postal address of the location, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub civic_address: Option<CivicAddress>,
}

/// Shape of a verification area.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AreaType {
    /// A circle around a center point.
    Circle,
}

/// Area a device is verified against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    /// Area shape.
    pub area_type: AreaType,
    /// Center of the circle.
    pub center: Point,
    /// Radius in meters.
    pub radius: u32,
}

impl Area {
    /// A circular area.
    #[must_use]
    pub const fn circle(latitude: f64, longitude: f64, radius: u32) -> Self {
        Self {
            area_type: AreaType::Circle,
            center: Point {
                latitude,
                longitude,
            },
            radius,
        }
    }
}

/// Body of `POST /verify`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyLocationRequest {
    /// Device to verify.
    pub device: DeviceIdentifier,
    /// Area the device is expected in.
    pub area: Area,
    /// Maximum acceptable age of the location fix, in seconds.
    pub max_age: u32,
}

/// Outcome reported by the verification API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationResult {
    /// The device is within the area.
    True,
    /// The device is outside the area.
    False,
    /// The location fix only partially overlaps the area.
    Partial,
    /// Any other answer.
    #[serde(other)]
    Unknown,
}

/// Response of `POST /verify`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyLocationResponse {
    /// Verification outcome.
    pub verification_result: VerificationResult,
}

impl VerifyLocationResponse {
    /// Returns true only for a `TRUE` verification result.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.verification_result == VerificationResult::True
    }
}
