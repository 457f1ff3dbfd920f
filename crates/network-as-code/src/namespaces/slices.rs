use crate::models::{Slice, SliceOptions};
use nac_core::Result;
use nac_slicing::{NetworkIdentifier, SliceInfo, SlicingClient};
use tracing::{info, warn};

/// Network slice operations.
#[derive(Debug, Clone, Copy)]
pub struct Slices<'a> {
    slicing: &'a SlicingClient,
}

impl<'a> Slices<'a> {
    pub(crate) const fn new(slicing: &'a SlicingClient) -> Self {
        Self { slicing }
    }

    /// Order a new slice.
    ///
    /// The returned slice carries the state reported by the server, usually
    /// [`SliceState::Pending`](nac_slicing::SliceState::Pending).
    ///
    /// # Errors
    ///
    /// Returns the error reported by the slicing API.
    pub async fn create(
        &self,
        network_identifier: NetworkIdentifier,
        slice_info: SliceInfo,
        notification_url: impl Into<String>,
        options: SliceOptions,
    ) -> Result<Slice> {
        let request = options.into_slice_data(network_identifier, slice_info, notification_url.into());
        let response = self.slicing.create_slice(&request).await?;
        let slice =
            Slice::from_response(response, request.name.as_deref(), self.slicing.clone())?;
        info!(slice = slice.name(), state = %slice.state(), "slice created");
        Ok(slice)
    }

    /// Fetch a slice by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](nac_core::Error::NotFound) for an unknown name.
    pub async fn get(&self, name: &str) -> Result<Slice> {
        let response = self.slicing.get_slice(name).await?;
        Slice::from_response(response, Some(name), self.slicing.clone())
    }

    /// List every slice visible to the caller.
    ///
    /// Entries without a name cannot be addressed again and are skipped.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the slicing API.
    pub async fn get_all(&self) -> Result<Vec<Slice>> {
        let responses = self.slicing.list_slices().await?;
        let mut slices = Vec::with_capacity(responses.len());
        for response in responses {
            match Slice::from_response(response, None, self.slicing.clone()) {
                Ok(slice) => slices.push(slice),
                Err(err) => warn!("skipping listed slice: {err}"),
            }
        }
        Ok(slices)
    }
}
