//! Parameter addressing, display-value resolution and application.
//!
//! - [`address`]: track/device lookup across track kinds, with capability flags
//! - [`index`]: name → position lookup for one device
//! - [`resolve`]: display string → raw value
//! - [`apply`]: clamp and apply, singly or in isolated batches
//! - [`snapshot`]: read a device's parameters back out

pub mod address;
pub mod apply;
pub mod index;
pub mod resolve;
pub mod snapshot;

pub use address::{resolve_device, resolve_device_mut, resolve_track, resolve_track_mut, DeviceHandle, DeviceView};
pub use apply::{apply_batch, apply_one, clamp_value, Applied, ValueSpec};
pub use index::ParameterIndex;
pub use resolve::{displays_match, normalize_display, resolve_display_value, ResolveOptions};
pub use snapshot::{read_parameters, snapshot_parameter};
