//! Location retrieval and verification clients for Network as Code.
//!
//! Provides typed request/response structures and an asynchronous client for the
//! location-retrieval (`POST /retrieve`) and location-verification (`POST /verify`) APIs.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{LocationClient, LocationClientBuilder};
pub use models::{
    Area, AreaType, CivicAddress, LocationResponse, Point, RetrieveLocationRequest,
    VerificationResult, VerifyLocationRequest, VerifyLocationResponse, DEFAULT_MAX_AGE,
};

/// Convenient result alias that reuses the shared Network as Code error type.
pub type Result<T> = nac_core::Result<T>;
