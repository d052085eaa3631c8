//! Response shapes returned by command dispatch.
//!
//! Optional fields are omitted from the serialized form when absent, so a
//! client can tell "not reported" apart from a default value.

use serde::{Deserialize, Serialize};

use crate::{BatchResult, DeviceKind, PadNote, ParameterSnapshot, TrackKind};

// ============================================================================
// Devices
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceParameters {
    pub device_name: String,
    /// Host class name of the device.
    pub device_type: String,
    pub parameters: Vec<ParameterSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub device_name: String,
    pub parameter_name: String,
    pub value: f64,
    pub clamped: bool,
    pub track_type: TrackKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchApplied {
    pub device_name: String,
    pub track_type: TrackKind,
    pub results: Vec<BatchResult>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub device_name: String,
    pub class_name: String,
    pub class_display_name: String,
    pub device_type: DeviceKind,
    pub can_have_drum_pads: bool,
    pub can_have_chains: bool,
    pub parameter_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDeleted {
    pub deleted: bool,
    pub device_name: String,
    pub track_index: i64,
    pub device_index: i64,
}

// ============================================================================
// Racks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroInfo {
    pub index: usize,
    pub name: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub is_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroValues {
    pub track_index: i64,
    pub device_index: i64,
    pub device_name: String,
    pub macros: Vec<MacroInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSet {
    pub track_index: i64,
    pub device_index: i64,
    pub macro_index: i64,
    pub macro_name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackVariations {
    pub device_name: String,
    pub track_index: i64,
    pub device_index: i64,
    pub variation_count: usize,
    /// `-1` when no variation is selected.
    pub selected_variation_index: i64,
    pub has_macro_mappings: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationApplied {
    pub device_name: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_variation_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub randomized: Option<bool>,
}

// ============================================================================
// Drum racks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadInfo {
    pub note: PadNote,
    pub name: String,
    pub mute: bool,
    pub solo: bool,
    pub has_chains: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrumPads {
    pub device_name: String,
    pub track_index: i64,
    pub device_index: i64,
    pub pads: Vec<PadInfo>,
    pub pad_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadState {
    pub note: PadNote,
    pub name: String,
    pub mute: bool,
    pub solo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadCopied {
    pub source_note: PadNote,
    pub source_name: String,
    pub dest_note: PadNote,
    pub dest_name: String,
    pub copied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplerConverted {
    pub converted: bool,
    pub source_device: String,
    pub track_index: i64,
}

// ============================================================================
// Session / transport
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterSummary {
    pub name: String,
    pub volume: f64,
    pub panning: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub tempo: f64,
    pub signature_numerator: u32,
    pub signature_denominator: u32,
    pub track_count: usize,
    pub return_track_count: usize,
    pub master_track: MasterSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tempo {
    pub tempo: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playing {
    pub playing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongTransport {
    pub current_time: f64,
    pub is_playing: bool,
    pub tempo: f64,
    pub signature_numerator: u32,
    pub signature_denominator: u32,
    pub loop_enabled: bool,
    pub loop_start: f64,
    pub loop_length: f64,
    pub song_length: f64,
    pub record_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SongTime {
    pub current_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metronome {
    pub metronome: bool,
}

/// Outcome of an undo, redo or cue jump: either it happened, or a reason why not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

impl Attempt {
    pub fn done() -> Self {
        Self { done: true, reason: None, position: None }
    }

    pub fn refused(reason: impl Into<String>) -> Self {
        Self { done: false, reason: Some(reason.into()), position: None }
    }

    pub fn at(mut self, position: f64) -> Self {
        self.position = Some(position);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutomationReEnabled {
    pub re_enabled: bool,
}

// ============================================================================
// Loop
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoopState {
    pub loop_enabled: bool,
    pub loop_start: f64,
    pub loop_length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoopInfo {
    pub loop_start: f64,
    pub loop_end: f64,
    pub loop_length: f64,
    #[serde(rename = "loop")]
    pub enabled: bool,
    pub current_song_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoopBounds {
    pub loop_start: f64,
    pub loop_end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_length: Option<f64>,
}

// ============================================================================
// Recording
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overdub {
    pub arrangement_overdub: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordingState {
    pub recording: bool,
    pub playing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrangement_overdub: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmedTrack {
    pub index: usize,
    pub name: String,
    pub is_midi: bool,
    pub is_audio: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingStatus {
    pub record_mode: bool,
    pub arrangement_overdub: bool,
    pub session_record: bool,
    pub is_playing: bool,
    pub armed_tracks: Vec<ArmedTrack>,
    pub armed_track_count: usize,
}

// ============================================================================
// Cue points and grooves
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuePointInfo {
    pub name: String,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuePoints {
    pub cue_points: Vec<CuePointInfo>,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CueToggled {
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrooveInfo {
    pub index: usize,
    pub name: String,
    pub timing_amount: f64,
    pub quantization_amount: f64,
    pub random_amount: f64,
    pub velocity_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroovePool {
    pub groove_amount: f64,
    pub grooves: Vec<GrooveInfo>,
    pub groove_count: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrooveSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groove_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groove_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groove_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantization_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity_amount: Option<f64>,
}

impl GrooveSettings {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
