//! # nac-core
//!
//! Core types and utilities for working with the Network as Code APIs.
//!
//! This crate provides the shared error taxonomy, the HTTP transport abstraction and
//! the per-service request plumbing used by the location, quality-of-service and
//! slicing client crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`types`] - Service enumeration and shared wire types (device identifiers)
//! - [`config`] - Configuration structures for Network as Code clients
//! - [`client`] - Transport trait, reqwest transport and per-service client

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Error, ErrorKind, Result};
