//! Cached device state

mod snapshot;

pub use snapshot::DeviceSnapshot;
