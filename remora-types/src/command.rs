//! Command types for the dispatch system.
//!
//! A [`Command`] is one remote-control request. On the wire it is an object
//! `{"type": "<snake_case name>", "params": {...}}`; commands without
//! arguments may omit `params`.

use serde::{Deserialize, Serialize};

use crate::{BatchItem, DeviceRef, PadNote};

// ============================================================================
// Argument enums
// ============================================================================

/// Operation on a rack's stored macro variations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariationAction {
    Store,
    Recall,
    Delete,
    Randomize,
}

impl VariationAction {
    /// Whether the action operates on a specific, previously stored variation.
    pub fn needs_index(self) -> bool {
        matches!(self, VariationAction::Recall | VariationAction::Delete)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VariationAction::Store => "store",
            VariationAction::Recall => "recall",
            VariationAction::Delete => "delete",
            VariationAction::Randomize => "randomize",
        }
    }
}

impl std::fmt::Display for VariationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction for cue-point navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueDirection {
    Next,
    Prev,
}

// ============================================================================
// Device argument structs
// ============================================================================

/// Set one parameter by name, from a raw value or a display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetParameter {
    #[serde(flatten)]
    pub device: DeviceRef,
    pub parameter_name: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default, alias = "value_display")]
    pub display_value: Option<String>,
}

/// Set several parameters of one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetParametersBatch {
    #[serde(flatten)]
    pub device: DeviceRef,
    pub parameters: Vec<BatchItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetMacro {
    #[serde(flatten)]
    pub device: DeviceRef,
    pub macro_index: i64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDrumPad {
    #[serde(flatten)]
    pub device: DeviceRef,
    pub note: PadNote,
    #[serde(default)]
    pub mute: Option<bool>,
    #[serde(default)]
    pub solo: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyDrumPad {
    #[serde(flatten)]
    pub device: DeviceRef,
    pub source_note: PadNote,
    pub dest_note: PadNote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackVariation {
    #[serde(flatten)]
    pub device: DeviceRef,
    pub action: VariationAction,
    #[serde(default)]
    pub variation_index: Option<i64>,
}

// ============================================================================
// Session argument structs
// ============================================================================

/// Partial update of the arrangement loop bracket.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoopUpdate {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
}

/// Global groove amount and/or the amounts of one groove in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GrooveUpdate {
    #[serde(default)]
    pub groove_amount: Option<f64>,
    #[serde(default)]
    pub groove_index: Option<i64>,
    #[serde(default)]
    pub timing_amount: Option<f64>,
    #[serde(default)]
    pub quantization_amount: Option<f64>,
    #[serde(default)]
    pub random_amount: Option<f64>,
    #[serde(default)]
    pub velocity_amount: Option<f64>,
}

impl GrooveUpdate {
    pub fn has_groove_fields(&self) -> bool {
        self.timing_amount.is_some()
            || self.quantization_amount.is_some()
            || self.random_amount.is_some()
            || self.velocity_amount.is_some()
    }
}

// ============================================================================
// Command
// ============================================================================

/// A remote-control request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
pub enum Command {
    // --- Device parameters ---
    GetDeviceParameters(DeviceRef),
    SetDeviceParameter(SetParameter),
    SetDeviceParametersBatch(SetParametersBatch),
    GetDeviceInfo(DeviceRef),
    DeleteDevice(DeviceRef),

    // --- Racks ---
    GetMacroValues(DeviceRef),
    SetMacroValue(SetMacro),
    GetRackVariations(DeviceRef),
    RackVariationAction(RackVariation),

    // --- Drum racks ---
    GetDrumPads(DeviceRef),
    SetDrumPad(SetDrumPad),
    CopyDrumPad(CopyDrumPad),
    SlicedSimplerToDrumRack(DeviceRef),

    // --- Session / transport ---
    GetSessionInfo,
    SetTempo { tempo: f64 },
    StartPlayback,
    StopPlayback,
    ContinuePlaying,
    GetSongTransport,
    SetSongTime { time: f64 },
    SetPlaybackPosition { position: f64 },
    SetMetronome { enabled: bool },
    TapTempo,
    Undo,
    Redo,
    ReEnableAutomation,

    // --- Loop ---
    SetSongLoop(LoopUpdate),
    GetLoopInfo,
    SetLoopStart { position: f64 },
    SetLoopEnd { position: f64 },
    SetLoopLength { length: f64 },

    // --- Recording ---
    SetArrangementOverdub { enabled: bool },
    StartArrangementRecording,
    StopArrangementRecording {
        #[serde(default)]
        stop_playback: Option<bool>,
    },
    GetRecordingStatus,

    // --- Cue points ---
    GetCuePoints,
    SetOrDeleteCue,
    JumpToCue { direction: CueDirection },

    // --- Grooves ---
    GetGroovePool,
    SetGrooveSettings(GrooveUpdate),
}

impl Command {
    /// Wire name of the command, as used in the `type` field.
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetDeviceParameters(_) => "get_device_parameters",
            Command::SetDeviceParameter(_) => "set_device_parameter",
            Command::SetDeviceParametersBatch(_) => "set_device_parameters_batch",
            Command::GetDeviceInfo(_) => "get_device_info",
            Command::DeleteDevice(_) => "delete_device",
            Command::GetMacroValues(_) => "get_macro_values",
            Command::SetMacroValue(_) => "set_macro_value",
            Command::GetRackVariations(_) => "get_rack_variations",
            Command::RackVariationAction(_) => "rack_variation_action",
            Command::GetDrumPads(_) => "get_drum_pads",
            Command::SetDrumPad(_) => "set_drum_pad",
            Command::CopyDrumPad(_) => "copy_drum_pad",
            Command::SlicedSimplerToDrumRack(_) => "sliced_simpler_to_drum_rack",
            Command::GetSessionInfo => "get_session_info",
            Command::SetTempo { .. } => "set_tempo",
            Command::StartPlayback => "start_playback",
            Command::StopPlayback => "stop_playback",
            Command::ContinuePlaying => "continue_playing",
            Command::GetSongTransport => "get_song_transport",
            Command::SetSongTime { .. } => "set_song_time",
            Command::SetPlaybackPosition { .. } => "set_playback_position",
            Command::SetMetronome { .. } => "set_metronome",
            Command::TapTempo => "tap_tempo",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::ReEnableAutomation => "re_enable_automation",
            Command::SetSongLoop(_) => "set_song_loop",
            Command::GetLoopInfo => "get_loop_info",
            Command::SetLoopStart { .. } => "set_loop_start",
            Command::SetLoopEnd { .. } => "set_loop_end",
            Command::SetLoopLength { .. } => "set_loop_length",
            Command::SetArrangementOverdub { .. } => "set_arrangement_overdub",
            Command::StartArrangementRecording => "start_arrangement_recording",
            Command::StopArrangementRecording { .. } => "stop_arrangement_recording",
            Command::GetRecordingStatus => "get_recording_status",
            Command::GetCuePoints => "get_cue_points",
            Command::SetOrDeleteCue => "set_or_delete_cue",
            Command::JumpToCue { .. } => "jump_to_cue",
            Command::GetGroovePool => "get_groove_pool",
            Command::SetGrooveSettings(_) => "set_groove_settings",
        }
    }

    /// Whether the command only reads host state.
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            Command::GetDeviceParameters(_)
                | Command::GetDeviceInfo(_)
                | Command::GetMacroValues(_)
                | Command::GetRackVariations(_)
                | Command::GetDrumPads(_)
                | Command::GetSessionInfo
                | Command::GetSongTransport
                | Command::GetLoopInfo
                | Command::GetRecordingStatus
                | Command::GetCuePoints
                | Command::GetGroovePool
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TrackAddress, TrackKind};

    fn parse(json: &str) -> Command {
        serde_json::from_str(json).expect("parse command")
    }

    #[test]
    fn set_parameter_from_wire() {
        let cmd = parse(
            r#"{"type": "set_device_parameter", "params": {
                "track_index": 1, "track_type": "return", "device_index": 0,
                "parameter_name": "Rate", "value_display": "1/8"}}"#,
        );
        match cmd {
            Command::SetDeviceParameter(p) => {
                assert_eq!(p.device.track, TrackAddress::new(TrackKind::Return, 1));
                assert_eq!(p.parameter_name, "Rate");
                assert_eq!(p.display_value.as_deref(), Some("1/8"));
                assert_eq!(p.value, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unit_command_without_params() {
        assert_eq!(parse(r#"{"type": "start_playback"}"#), Command::StartPlayback);
    }

    #[test]
    fn batch_command_from_wire() {
        let cmd = parse(
            r#"{"type": "set_device_parameters_batch", "params": {
                "track_index": 0, "device_index": 2,
                "parameters": [{"name": "A", "value": 0.5}, {"name": "B", "display_value": "On"}]}}"#,
        );
        match cmd {
            Command::SetDeviceParametersBatch(b) => {
                assert_eq!(b.device.device_index, 2);
                assert_eq!(b.parameters.len(), 2);
                assert_eq!(b.parameters[1].display_value.as_deref(), Some("On"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn name_matches_wire_tag() {
        let cmds = [
            Command::SetTempo { tempo: 120.0 },
            Command::JumpToCue { direction: CueDirection::Prev },
            Command::SetSongLoop(LoopUpdate::default()),
            Command::GetDeviceParameters(DeviceRef::default()),
            Command::StopArrangementRecording { stop_playback: None },
        ];
        for cmd in cmds {
            let json = serde_json::to_value(&cmd).unwrap();
            assert_eq!(json["type"], cmd.name());
        }
    }

    #[test]
    fn unknown_variation_action_is_rejected() {
        let res: Result<Command, _> = serde_json::from_str(
            r#"{"type": "rack_variation_action", "params": {
                "track_index": 0, "device_index": 0, "action": "shuffle"}}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn queries_are_flagged() {
        assert!(Command::GetLoopInfo.is_query());
        assert!(!Command::TapTempo.is_query());
        assert!(VariationAction::Recall.needs_index());
        assert!(!VariationAction::Store.needs_index());
    }
}
