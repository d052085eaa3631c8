//! Device capability flags and classification.

use serde::{Deserialize, Serialize};

/// What a device can host beyond its own parameters.
///
/// Read once when a device handle is obtained; operations that need a rack or a
/// drum rack check these flags instead of probing the device again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Device exposes drum pads (a drum rack).
    pub drum_pads: bool,
    /// Device hosts chains and macro controls (a rack).
    pub chains: bool,
}

impl Capabilities {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn rack() -> Self {
        Self { drum_pads: false, chains: true }
    }

    pub fn drum_rack() -> Self {
        Self { drum_pads: true, chains: true }
    }
}

/// Coarse device classification reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    DrumMachine,
    Rack,
    Instrument,
    AudioEffect,
    MidiEffect,
    Unknown,
}

impl DeviceKind {
    /// Classify a device from its capabilities and host class names.
    ///
    /// Drum pads win over chains; the class-name checks are case-insensitive.
    pub fn classify(caps: Capabilities, class_name: &str, class_display_name: &str) -> Self {
        if caps.drum_pads {
            return DeviceKind::DrumMachine;
        }
        if caps.chains {
            return DeviceKind::Rack;
        }
        let class_name = class_name.to_lowercase();
        if class_display_name.to_lowercase().contains("instrument") {
            DeviceKind::Instrument
        } else if class_name.contains("audio_effect") {
            DeviceKind::AudioEffect
        } else if class_name.contains("midi_effect") {
            DeviceKind::MidiEffect
        } else {
            DeviceKind::Unknown
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceKind::DrumMachine => "drum_machine",
            DeviceKind::Rack => "rack",
            DeviceKind::Instrument => "instrument",
            DeviceKind::AudioEffect => "audio_effect",
            DeviceKind::MidiEffect => "midi_effect",
            DeviceKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
