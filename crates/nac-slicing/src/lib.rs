//! Network slicing client for Network as Code.
//!
//! Provides typed structures and an asynchronous client for the slice lifecycle:
//! creation, listing, activation, deactivation and deletion.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{SlicingClient, SlicingClientBuilder};
pub use models::{
    AreaOfService, NetworkIdentifier, Point, SliceData, SliceInfo, SliceResponse, SliceState,
    SliceStateResponse, Throughput,
};

/// Convenient result alias that reuses the shared Network as Code error type.
pub type Result<T> = nac_core::Result<T>;
