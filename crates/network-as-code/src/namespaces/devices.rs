use crate::models::Device;
use nac_core::types::DeviceIdentifier;
use nac_core::Result;
use nac_location::LocationClient;
use nac_qod::QodClient;

/// Device operations.
#[derive(Debug, Clone, Copy)]
pub struct Devices<'a> {
    location: &'a LocationClient,
    qod: &'a QodClient,
}

impl<'a> Devices<'a> {
    pub(crate) const fn new(location: &'a LocationClient, qod: &'a QodClient) -> Self {
        Self { location, qod }
    }

    /// Describe a device. Nothing is sent to the network.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`](nac_core::Error::ValidationError) when the
    /// identifier carries no identifying attribute.
    pub fn get(&self, identifier: DeviceIdentifier) -> Result<Device> {
        identifier.ensure_identifiable()?;
        Ok(Device::new(identifier, self.location.clone(), self.qod.clone()))
    }
}
