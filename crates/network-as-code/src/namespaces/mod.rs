//! Namespaces grouping the operations of [`NetworkAsCodeClient`](crate::NetworkAsCodeClient).

mod devices;
mod sessions;
mod slices;

pub use devices::Devices;
pub use sessions::Sessions;
pub use slices::Slices;
