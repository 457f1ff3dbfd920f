//! # network-as-code
//!
//! Object-oriented client for the Network as Code APIs.
//!
//! [`NetworkAsCodeClient`] is the entry point. Its namespaces hand out models bound to the
//! service clients that created them:
//!
//! - [`Devices`] builds [`Device`]s locally; a device retrieves and verifies its
//!   [`Location`] and opens quality-of-service sessions.
//! - [`Sessions`] looks up [`QodSession`]s by ID.
//! - [`Slices`] creates and lists network [`Slice`]s, whose lifecycle is driven by the
//!   server and re-synchronised on every call.
//!
//! ```no_run
//! use network_as_code::{DeviceIdentifier, DeviceIpv4Addr, NetworkAsCodeClient};
//!
//! # async fn run() -> network_as_code::Result<()> {
//! let client = NetworkAsCodeClient::new("MY_TOKEN")?;
//! let device = client.devices().get(
//!     DeviceIdentifier::new()
//!         .with_network_access_identifier("device@testcsp.net")
//!         .with_ipv4_address(DeviceIpv4Addr::new("1.1.1.2")),
//! )?;
//!
//! let session = device.create_qod_session("QOS_L", Some("5.6.7.8"), None).await?;
//! println!("session {} is {}", session.id(), session.status());
//! # Ok(())
//! # }
//! ```
//!
//! No call is ever retried; failures are returned as [`Error`].

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod models;
pub mod namespaces;

pub use client::{NetworkAsCodeClient, NetworkAsCodeClientBuilder, ENV_TOKEN};
pub use models::{
    CreateSessionOptions, Device, Location, QodSession, Slice, SliceOptions,
};
pub use namespaces::{Devices, Sessions, Slices};

pub use nac_core::config::{NacClientConfig, ServiceEndpointConfig, ServiceEndpoints};
pub use nac_core::types::{DeviceIdentifier, DeviceIpv4Addr, Environment};
pub use nac_core::{Error, ErrorKind, Result};
pub use nac_location::CivicAddress;
pub use nac_qod::{PortRange, PortsSpec};
pub use nac_slicing::{AreaOfService, NetworkIdentifier, Point, SliceInfo, SliceState, Throughput};
