//! Quality-of-service-on-demand client for Network as Code.
//!
//! Provides typed structures and an asynchronous client for creating, inspecting and
//! deleting QoD sessions.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{QodClient, QodClientBuilder};
pub use models::{
    ApplicationServer, CreateSessionRequest, PortRange, PortsSpec, SessionInfo,
    SessionListParams,
};

/// Convenient result alias that reuses the shared Network as Code error type.
pub type Result<T> = nac_core::Result<T>;
