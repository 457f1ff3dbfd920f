use chrono::{DateTime, Utc};
use nac_core::{Error, Result};
use nac_slicing::{
    AreaOfService, NetworkIdentifier, Point, SliceData, SliceInfo, SliceResponse, SliceState,
    SliceStateResponse, SlicingClient, Throughput,
};
use tracing::debug;

/// Optional attributes of a new slice. Unset options are left out of the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceOptions {
    /// Slice name.
    pub name: Option<String>,
    /// Token sent with slice notifications.
    pub notification_auth_token: Option<String>,
    /// Area the slice serves.
    pub area_of_service: Option<AreaOfService>,
    /// Maximum number of data connections.
    pub max_data_connections: Option<u32>,
    /// Maximum number of devices.
    pub max_devices: Option<u32>,
    /// Slice-level downlink throughput.
    pub slice_downlink_throughput: Option<Throughput>,
    /// Slice-level uplink throughput.
    pub slice_uplink_throughput: Option<Throughput>,
    /// Per-device downlink throughput.
    pub device_downlink_throughput: Option<Throughput>,
    /// Per-device uplink throughput.
    pub device_uplink_throughput: Option<Throughput>,
}

impl SliceOptions {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the slice.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Authenticate notifications with a token.
    #[must_use]
    pub fn with_notification_auth_token(mut self, token: impl Into<String>) -> Self {
        self.notification_auth_token = Some(token.into());
        self
    }

    /// Serve the polygon spanned by the points, in the given order.
    #[must_use]
    pub fn with_area_of_service(mut self, polygon: impl IntoIterator<Item = Point>) -> Self {
        self.area_of_service = Some(AreaOfService {
            polygon: polygon.into_iter().collect(),
        });
        self
    }

    /// Cap data connections.
    #[must_use]
    pub const fn with_max_data_connections(mut self, max: u32) -> Self {
        self.max_data_connections = Some(max);
        self
    }

    /// Cap devices.
    #[must_use]
    pub const fn with_max_devices(mut self, max: u32) -> Self {
        self.max_devices = Some(max);
        self
    }

    /// Set slice-level downlink and uplink throughput.
    #[must_use]
    pub const fn with_slice_throughput(mut self, downlink: Throughput, uplink: Throughput) -> Self {
        self.slice_downlink_throughput = Some(downlink);
        self.slice_uplink_throughput = Some(uplink);
        self
    }

    /// Set per-device downlink and uplink throughput.
    #[must_use]
    pub const fn with_device_throughput(mut self, downlink: Throughput, uplink: Throughput) -> Self {
        self.device_downlink_throughput = Some(downlink);
        self.device_uplink_throughput = Some(uplink);
        self
    }

    pub(crate) fn into_slice_data(
        self,
        network_identifier: NetworkIdentifier,
        slice_info: SliceInfo,
        notification_url: String,
    ) -> SliceData {
        SliceData {
            name: self.name,
            network_identifier,
            slice_info,
            area_of_service: self.area_of_service,
            max_data_connections: self.max_data_connections,
            max_devices: self.max_devices,
            slice_downlink_throughput: self.slice_downlink_throughput,
            slice_uplink_throughput: self.slice_uplink_throughput,
            device_downlink_throughput: self.device_downlink_throughput,
            device_uplink_throughput: self.device_uplink_throughput,
            notification_url,
            notification_auth_token: self.notification_auth_token,
        }
    }
}

/// A network slice.
///
/// The server owns the lifecycle. [`state`](Self::state) is accurate right after
/// [`refresh`](Self::refresh), [`activate`](Self::activate),
/// [`deactivate`](Self::deactivate) or a state-echoing [`delete`](Self::delete); at any
/// other time it may be stale.
#[derive(Debug, Clone)]
pub struct Slice {
    name: String,
    sid: Option<String>,
    state: SliceState,
    data: SliceData,
    start_polling_at: Option<DateTime<Utc>>,
    client: SlicingClient,
}

impl Slice {
    /// Build a slice from a server response, falling back to `requested_name` when the
    /// response omits the name.
    pub(crate) fn from_response(
        mut response: SliceResponse,
        requested_name: Option<&str>,
        client: SlicingClient,
    ) -> Result<Self> {
        let Some(name) = response
            .slice
            .name
            .clone()
            .or_else(|| requested_name.map(str::to_owned))
        else {
            return Err(Error::ParseError(format!(
                "slice response carries no name (csi_id {})",
                response.csi_id.as_deref().unwrap_or("unknown")
            )));
        };
        response.slice.name = Some(name.clone());

        Ok(Self {
            name,
            sid: response.csi_id,
            state: response.state,
            start_polling_at: polling_time(response.start_polling_at),
            data: response.slice,
            client,
        })
    }

    /// Client-chosen name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Server-issued slice ID.
    #[must_use]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    /// Last known state.
    #[must_use]
    pub const fn state(&self) -> SliceState {
        self.state
    }

    /// Network the slice lives in.
    #[must_use]
    pub const fn network_identifier(&self) -> &NetworkIdentifier {
        &self.data.network_identifier
    }

    /// Slice/service type.
    #[must_use]
    pub const fn slice_info(&self) -> &SliceInfo {
        &self.data.slice_info
    }

    /// Area of service, when set.
    #[must_use]
    pub const fn area_of_service(&self) -> Option<&AreaOfService> {
        self.data.area_of_service.as_ref()
    }

    /// Callback URL for slice notifications.
    #[must_use]
    pub fn notification_url(&self) -> &str {
        &self.data.notification_url
    }

    /// Token sent with slice notifications.
    #[must_use]
    pub fn notification_auth_token(&self) -> Option<&str> {
        self.data.notification_auth_token.as_deref()
    }

    /// Maximum number of data connections.
    #[must_use]
    pub const fn max_data_connections(&self) -> Option<u32> {
        self.data.max_data_connections
    }

    /// Maximum number of devices.
    #[must_use]
    pub const fn max_devices(&self) -> Option<u32> {
        self.data.max_devices
    }

    /// Slice-level downlink throughput.
    #[must_use]
    pub const fn slice_downlink_throughput(&self) -> Option<Throughput> {
        self.data.slice_downlink_throughput
    }

    /// Slice-level uplink throughput.
    #[must_use]
    pub const fn slice_uplink_throughput(&self) -> Option<Throughput> {
        self.data.slice_uplink_throughput
    }

    /// Per-device downlink throughput.
    #[must_use]
    pub const fn device_downlink_throughput(&self) -> Option<Throughput> {
        self.data.device_downlink_throughput
    }

    /// Per-device uplink throughput.
    #[must_use]
    pub const fn device_uplink_throughput(&self) -> Option<Throughput> {
        self.data.device_uplink_throughput
    }

    /// Earliest time at which polling the state is worthwhile, as hinted by the server.
    #[must_use]
    pub const fn start_polling_at(&self) -> Option<DateTime<Utc>> {
        self.start_polling_at
    }

    /// Re-fetch the slice and overwrite every local field, state included.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the slicing API; the slice is then unchanged.
    pub async fn refresh(&mut self) -> Result<()> {
        let response = self.client.get_slice(&self.name).await?;
        self.sid = response.csi_id;
        self.start_polling_at = polling_time(response.start_polling_at);
        self.data = response.slice;
        self.apply_server_state(response.state);
        Ok(())
    }

    /// Ask the server to activate the slice. It must be `AVAILABLE`.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, typically [`Error::Conflict`] or
    /// [`Error::BadRequest`] in the wrong state.
    pub async fn activate(&mut self) -> Result<()> {
        let response = self.client.activate_slice(&self.name).await?;
        self.apply_echoed_state(response);
        Ok(())
    }

    /// Ask the server to deactivate the slice. It must be `OPERATING`.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection.
    pub async fn deactivate(&mut self) -> Result<()> {
        let response = self.client.deactivate_slice(&self.name).await?;
        self.apply_echoed_state(response);
        Ok(())
    }

    /// Ask the server to delete the slice.
    ///
    /// The local object survives; [`refresh`](Self::refresh) will report `DELETED` once the
    /// server has removed it.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection.
    pub async fn delete(&mut self) -> Result<()> {
        let response = self.client.delete_slice(&self.name).await?;
        self.apply_echoed_state(response);
        Ok(())
    }

    fn apply_echoed_state(&mut self, response: Option<SliceStateResponse>) {
        if let Some(state) = response.and_then(|response| response.state) {
            self.apply_server_state(state);
        }
    }

    fn apply_server_state(&mut self, state: SliceState) {
        if self.state != state {
            debug!(slice = %self.name, from = %self.state, to = %state, "slice state changed");
        }
        self.state = state;
    }
}

fn polling_time(epoch_seconds: Option<i64>) -> Option<DateTime<Utc>> {
    epoch_seconds.and_then(|secs| DateTime::from_timestamp(secs, 0))
}
