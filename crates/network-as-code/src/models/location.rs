use nac_location::{CivicAddress, LocationResponse};
use serde::{Deserialize, Serialize};

/// Location of a device at the time it was retrieved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Postal address, when the network knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub civic_address: Option<CivicAddress>,
}

impl From<LocationResponse> for Location {
    fn from(response: LocationResponse) -> Self {
        Self {
            latitude: response.point.latitude,
            longitude: response.point.longitude,
            civic_address: response.civic_address,
        }
    }
}
