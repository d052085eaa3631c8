//! # remora-types
//!
//! Shared type definitions for the remora control-surface command layer.
//! Everything here is plain data: track addresses, parameter snapshots, batch
//! items, the [`Command`] enum and the response shapes returned for each command.
//! The host object model and all behavior live in `remora-core`.

pub mod address;
pub mod command;
mod device;
mod dispatch;
mod param;
pub mod response;

pub use address::{DeviceRef, TrackAddress, TrackKind};
pub use command::*;
pub use device::{Capabilities, DeviceKind};
pub use dispatch::Dispatcher;
pub use param::{BatchItem, BatchResult, ParameterSnapshot};

/// MIDI note number identifying a drum pad.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct PadNote(i32);

impl PadNote {
    pub fn new(note: i32) -> Self {
        Self(note)
    }
    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for PadNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
