//! Track and device addressing.
//!
//! A device is addressed by the kind of track that holds it, the track's index
//! within that kind, and the device's position on the track. Indices are signed
//! on the wire so that out-of-range requests (including negative ones) can be
//! reported instead of rejected by the decoder.

use serde::{Deserialize, Serialize};

/// Which of the host's track collections an address refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Regular audio/MIDI tracks.
    #[default]
    Track,
    /// Return (send) tracks.
    Return,
    /// The single master track. Any index is ignored.
    Master,
}

impl TrackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackKind::Track => "track",
            TrackKind::Return => "return",
            TrackKind::Master => "master",
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address of one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TrackAddress {
    #[serde(rename = "track_type", default)]
    pub kind: TrackKind,
    #[serde(rename = "track_index", default)]
    pub index: i64,
}

impl TrackAddress {
    pub fn new(kind: TrackKind, index: i64) -> Self {
        Self { kind, index }
    }

    pub fn track(index: i64) -> Self {
        Self::new(TrackKind::Track, index)
    }

    pub fn return_track(index: i64) -> Self {
        Self::new(TrackKind::Return, index)
    }

    pub fn master() -> Self {
        Self::new(TrackKind::Master, 0)
    }
}

impl std::fmt::Display for TrackAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TrackKind::Master => f.write_str("master"),
            kind => write!(f, "{} {}", kind, self.index),
        }
    }
}

/// Address of one device: a track plus the device's position on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DeviceRef {
    #[serde(flatten)]
    pub track: TrackAddress,
    pub device_index: i64,
}

impl DeviceRef {
    pub fn new(track: TrackAddress, device_index: i64) -> Self {
        Self { track, device_index }
    }
}
