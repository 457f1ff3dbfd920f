//! Models returned by the namespaces.
//!
//! Every instance is an independent snapshot: two lookups of the same resource yield two
//! objects that do not observe each other's refreshes.

mod device;
mod location;
mod session;
mod slice;

pub use device::Device;
pub use location::Location;
pub use session::{CreateSessionOptions, QodSession};
pub use slice::{Slice, SliceOptions};
