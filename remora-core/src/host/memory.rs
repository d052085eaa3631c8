//! In-memory host.
//!
//! A self-contained implementation of the host traits, loadable from JSON.
//! Used by the integration tests and by `remora-cli` to replay commands
//! against a fixture without a running DAW.

use serde::{Deserialize, Serialize};

use remora_types::Capabilities;

use super::{CuePoint, Device, DrumPad, DrumRack, Groove, Parameter, Rack, Song, Track};
use crate::error::HostError;

// ============================================================================
// Parameters
// ============================================================================

/// How a [`MemoryParameter`] renders raw values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayFormat {
    /// Label from `value_items`, assuming evenly spaced raw values.
    Items,
    /// Fixed-point number followed by an optional unit, e.g. `"7 Hz"`.
    Number {
        #[serde(default)]
        unit: String,
        #[serde(default)]
        decimals: usize,
    },
    /// One label per integer step from `floor(min)`. `null` entries fail to render.
    Table { labels: Vec<Option<String>> },
    /// Rendering always fails.
    Unrenderable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryParameter {
    pub name: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
    #[serde(default)]
    pub is_quantized: bool,
    #[serde(default)]
    pub value_items: Vec<String>,
    /// Rendering rule. Defaults to `Items` for enumerated parameters and a
    /// two-decimal number otherwise.
    #[serde(default)]
    pub display: Option<DisplayFormat>,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
}

fn default_max() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

impl MemoryParameter {
    /// Continuous parameter rendered as a two-decimal number.
    pub fn continuous(name: &str, value: f64, min: f64, max: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
            min,
            max,
            is_quantized: false,
            value_items: Vec::new(),
            display: None,
            is_enabled: true,
        }
    }

    /// Enumerated parameter spanning `0..=labels.len() - 1`.
    pub fn enumerated(name: &str, labels: &[&str], index: usize) -> Self {
        let max = labels.len().saturating_sub(1) as f64;
        Self {
            name: name.to_string(),
            value: (index as f64).min(max),
            min: 0.0,
            max,
            is_quantized: true,
            value_items: labels.iter().map(|s| s.to_string()).collect(),
            display: None,
            is_enabled: true,
        }
    }

    pub fn with_display(mut self, display: DisplayFormat) -> Self {
        self.display = Some(display);
        self
    }

    fn effective_display(&self) -> DisplayFormat {
        match &self.display {
            Some(d) => d.clone(),
            None if self.is_quantized && !self.value_items.is_empty() => DisplayFormat::Items,
            None => DisplayFormat::Number { unit: String::new(), decimals: 2 },
        }
    }
}

impl Parameter for MemoryParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    fn min(&self) -> f64 {
        self.min
    }

    fn max(&self) -> f64 {
        self.max
    }

    fn is_quantized(&self) -> bool {
        self.is_quantized
    }

    fn value_items(&self) -> Vec<String> {
        self.value_items.clone()
    }

    fn render(&self, value: f64) -> Result<String, HostError> {
        if !value.is_finite() {
            return Err(HostError::Unrenderable(value));
        }
        match self.effective_display() {
            DisplayFormat::Items => {
                let n = self.value_items.len();
                if n == 0 {
                    return Err(HostError::Unrenderable(value));
                }
                let step = (self.max - self.min) / (n.saturating_sub(1).max(1)) as f64;
                let pos = if step == 0.0 { 0.0 } else { ((value - self.min) / step).round() };
                if pos < 0.0 || pos >= n as f64 {
                    return Err(HostError::Unrenderable(value));
                }
                Ok(self.value_items[pos as usize].clone())
            }
            DisplayFormat::Number { unit, decimals } => {
                if unit.is_empty() {
                    Ok(format!("{:.*}", decimals, value))
                } else {
                    Ok(format!("{:.*} {}", decimals, value, unit))
                }
            }
            DisplayFormat::Table { labels } => {
                let pos = value.round() - self.min.floor();
                if pos < 0.0 || pos >= labels.len() as f64 {
                    return Err(HostError::Unrenderable(value));
                }
                labels[pos as usize].clone().ok_or(HostError::Unrenderable(value))
            }
            DisplayFormat::Unrenderable => Err(HostError::Unrenderable(value)),
        }
    }

    fn is_enabled(&self) -> bool {
        self.is_enabled
    }
}

// ============================================================================
// Drum racks and racks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryDrumPad {
    pub note: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub solo: bool,
    #[serde(default)]
    pub chain_count: usize,
}

impl MemoryDrumPad {
    pub fn new(note: i32, name: &str) -> Self {
        Self { note, name: name.to_string(), mute: false, solo: false, chain_count: 0 }
    }
}

impl DrumPad for MemoryDrumPad {
    fn note(&self) -> i32 {
        self.note
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn mute(&self) -> bool {
        self.mute
    }
    fn set_mute(&mut self, mute: bool) {
        self.mute = mute;
    }
    fn solo(&self) -> bool {
        self.solo
    }
    fn set_solo(&mut self, solo: bool) {
        self.solo = solo;
    }
    fn chain_count(&self) -> usize {
        self.chain_count
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryDrumRack {
    #[serde(default)]
    pub pads: Vec<MemoryDrumPad>,
    /// Whether the host version supports copying pads.
    #[serde(default = "default_true")]
    pub supports_copy: bool,
}

impl DrumRack for MemoryDrumRack {
    fn pad_count(&self) -> usize {
        self.pads.len()
    }

    fn pad(&self, index: usize) -> Option<&dyn DrumPad> {
        self.pads.get(index).map(|p| p as &dyn DrumPad)
    }

    fn pad_mut(&mut self, index: usize) -> Option<&mut dyn DrumPad> {
        self.pads.get_mut(index).map(|p| p as &mut dyn DrumPad)
    }

    fn copy_pad(&mut self, source_note: i32, dest_note: i32) -> Result<(), HostError> {
        if !self.supports_copy {
            return Err(HostError::Unsupported("copy_pad"));
        }
        let source = self
            .pads
            .iter()
            .find(|p| p.note == source_note)
            .cloned()
            .ok_or_else(|| HostError::Rejected(format!("no pad for note {}", source_note)))?;
        let dest = self
            .pads
            .iter_mut()
            .find(|p| p.note == dest_note)
            .ok_or_else(|| HostError::Rejected(format!("no pad for note {}", dest_note)))?;
        dest.name = source.name;
        dest.chain_count = source.chain_count;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRack {
    #[serde(default)]
    pub variation_count: usize,
    #[serde(default = "no_selection")]
    pub selected_variation_index: i64,
    #[serde(default)]
    pub has_macro_mappings: bool,
    /// Last variation recalled, for inspection in tests.
    #[serde(default)]
    pub recalled: Option<i64>,
    #[serde(default)]
    pub randomized: u32,
}

fn no_selection() -> i64 {
    -1
}

impl Default for MemoryRack {
    fn default() -> Self {
        Self {
            variation_count: 0,
            selected_variation_index: -1,
            has_macro_mappings: false,
            recalled: None,
            randomized: 0,
        }
    }
}

impl MemoryRack {
    fn selection_valid(&self) -> bool {
        self.selected_variation_index >= 0
            && (self.selected_variation_index as usize) < self.variation_count
    }
}

impl Rack for MemoryRack {
    fn variation_count(&self) -> usize {
        self.variation_count
    }

    fn selected_variation_index(&self) -> i64 {
        self.selected_variation_index
    }

    fn set_selected_variation_index(&mut self, index: i64) {
        // Out-of-range selections clear the selection.
        self.selected_variation_index = if index >= 0 && (index as usize) < self.variation_count { index } else { -1 };
    }

    fn has_macro_mappings(&self) -> bool {
        self.has_macro_mappings
    }

    fn store_variation(&mut self) {
        self.variation_count += 1;
        self.selected_variation_index = self.variation_count as i64 - 1;
    }

    fn recall_selected_variation(&mut self) {
        if self.selection_valid() {
            self.recalled = Some(self.selected_variation_index);
        }
    }

    fn delete_selected_variation(&mut self) {
        if self.selection_valid() {
            self.variation_count -= 1;
            self.selected_variation_index = -1;
        }
    }

    fn randomize_macros(&mut self) {
        self.randomized += 1;
    }
}

// ============================================================================
// Devices and tracks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryDevice {
    pub name: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub class_display_name: String,
    #[serde(default)]
    pub parameters: Vec<MemoryParameter>,
    #[serde(default)]
    pub drum_rack: Option<MemoryDrumRack>,
    #[serde(default)]
    pub rack: Option<MemoryRack>,
}

impl MemoryDevice {
    pub fn new(name: &str, class_name: &str, parameters: Vec<MemoryParameter>) -> Self {
        Self {
            name: name.to_string(),
            class_name: class_name.to_string(),
            class_display_name: name.to_string(),
            parameters,
            drum_rack: None,
            rack: None,
        }
    }

    /// Rack with a device-on switch followed by eight macros.
    pub fn rack(name: &str, class_name: &str) -> Self {
        let mut parameters = vec![MemoryParameter::enumerated("Device On", &["Off", "On"], 1)];
        for i in 1..=8 {
            parameters.push(MemoryParameter::continuous(&format!("Macro {}", i), 0.0, 0.0, 127.0));
        }
        Self {
            rack: Some(MemoryRack::default()),
            ..Self::new(name, class_name, parameters)
        }
    }

    pub fn drum_rack(name: &str, pads: Vec<MemoryDrumPad>) -> Self {
        Self {
            drum_rack: Some(MemoryDrumRack { pads, supports_copy: true }),
            ..Self::rack(name, "DrumGroupDevice")
        }
    }
}

impl Device for MemoryDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn class_display_name(&self) -> &str {
        &self.class_display_name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities { drum_pads: self.drum_rack.is_some(), chains: self.rack.is_some() }
    }

    fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    fn parameter(&self, index: usize) -> Option<&dyn Parameter> {
        self.parameters.get(index).map(|p| p as &dyn Parameter)
    }

    fn parameter_mut(&mut self, index: usize) -> Option<&mut dyn Parameter> {
        self.parameters.get_mut(index).map(|p| p as &mut dyn Parameter)
    }

    fn as_drum_rack(&self) -> Option<&dyn DrumRack> {
        self.drum_rack.as_ref().map(|r| r as &dyn DrumRack)
    }

    fn as_drum_rack_mut(&mut self) -> Option<&mut dyn DrumRack> {
        self.drum_rack.as_mut().map(|r| r as &mut dyn DrumRack)
    }

    fn as_rack(&self) -> Option<&dyn Rack> {
        self.rack.as_ref().map(|r| r as &dyn Rack)
    }

    fn as_rack_mut(&mut self) -> Option<&mut dyn Rack> {
        self.rack.as_mut().map(|r| r as &mut dyn Rack)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryTrack {
    pub name: String,
    #[serde(default)]
    pub devices: Vec<MemoryDevice>,
    #[serde(default = "default_true")]
    pub can_be_armed: bool,
    #[serde(default)]
    pub armed: bool,
    #[serde(default)]
    pub has_midi_input: bool,
    #[serde(default)]
    pub has_audio_input: bool,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub panning: f64,
}

fn default_volume() -> f64 {
    0.85
}

impl Default for MemoryTrack {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemoryTrack {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            devices: Vec::new(),
            can_be_armed: true,
            armed: false,
            has_midi_input: false,
            has_audio_input: false,
            volume: default_volume(),
            panning: 0.0,
        }
    }

    pub fn with_device(mut self, device: MemoryDevice) -> Self {
        self.devices.push(device);
        self
    }
}

impl Track for MemoryTrack {
    fn name(&self) -> &str {
        &self.name
    }

    fn device_count(&self) -> usize {
        self.devices.len()
    }

    fn device(&self, index: usize) -> Option<&dyn Device> {
        self.devices.get(index).map(|d| d as &dyn Device)
    }

    fn device_mut(&mut self, index: usize) -> Option<&mut dyn Device> {
        self.devices.get_mut(index).map(|d| d as &mut dyn Device)
    }

    fn delete_device(&mut self, index: usize) -> Result<(), HostError> {
        if index >= self.devices.len() {
            return Err(HostError::Rejected(format!("no device at {}", index)));
        }
        self.devices.remove(index);
        Ok(())
    }

    fn can_be_armed(&self) -> bool {
        self.can_be_armed
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn has_midi_input(&self) -> bool {
        self.has_midi_input
    }

    fn has_audio_input(&self) -> bool {
        self.has_audio_input
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn panning(&self) -> f64 {
        self.panning
    }
}

// ============================================================================
// Song
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryGroove {
    pub name: String,
    #[serde(default)]
    pub timing_amount: f64,
    #[serde(default)]
    pub quantization_amount: f64,
    #[serde(default)]
    pub random_amount: f64,
    #[serde(default)]
    pub velocity_amount: f64,
}

impl MemoryGroove {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            timing_amount: 0.0,
            quantization_amount: 0.0,
            random_amount: 0.0,
            velocity_amount: 0.0,
        }
    }
}

impl Groove for MemoryGroove {
    fn name(&self) -> &str {
        &self.name
    }
    fn timing_amount(&self) -> f64 {
        self.timing_amount
    }
    fn set_timing_amount(&mut self, amount: f64) {
        self.timing_amount = amount;
    }
    fn quantization_amount(&self) -> f64 {
        self.quantization_amount
    }
    fn set_quantization_amount(&mut self, amount: f64) {
        self.quantization_amount = amount;
    }
    fn random_amount(&self) -> f64 {
        self.random_amount
    }
    fn set_random_amount(&mut self, amount: f64) {
        self.random_amount = amount;
    }
    fn velocity_amount(&self) -> f64 {
        self.velocity_amount
    }
    fn set_velocity_amount(&mut self, amount: f64) {
        self.velocity_amount = amount;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryTransport {
    pub tempo: f64,
    pub signature_numerator: u32,
    pub signature_denominator: u32,
    pub playing: bool,
    pub song_time: f64,
    pub song_length: f64,
    pub metronome: bool,
    pub loop_enabled: bool,
    pub loop_start: f64,
    pub loop_length: f64,
    pub record_mode: bool,
    pub arrangement_overdub: bool,
    pub session_record: bool,
    pub taps: u32,
    pub automation_overridden: bool,
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self {
            tempo: 120.0,
            signature_numerator: 4,
            signature_denominator: 4,
            playing: false,
            song_time: 0.0,
            song_length: 0.0,
            metronome: false,
            loop_enabled: false,
            loop_start: 0.0,
            loop_length: 16.0,
            record_mode: false,
            arrangement_overdub: false,
            session_record: false,
            taps: 0,
            automation_overridden: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemorySong {
    pub tracks: Vec<MemoryTrack>,
    pub return_tracks: Vec<MemoryTrack>,
    pub master: MemoryTrack,
    pub transport: MemoryTransport,
    pub cue_points: Vec<MemoryCue>,
    pub groove_amount: f64,
    /// `None` models a host without a groove pool.
    pub grooves: Option<Vec<MemoryGroove>>,
    pub undo_steps: u32,
    pub redo_steps: u32,
    pub supports_simpler_conversion: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryCue {
    pub name: String,
    pub time: f64,
}

impl Default for MemorySong {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            return_tracks: Vec::new(),
            master: MemoryTrack::new("Master"),
            transport: MemoryTransport::default(),
            cue_points: Vec::new(),
            groove_amount: 1.0,
            grooves: Some(Vec::new()),
            undo_steps: 0,
            redo_steps: 0,
            supports_simpler_conversion: false,
        }
    }
}

impl MemorySong {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, track: MemoryTrack) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn with_return_track(mut self, track: MemoryTrack) -> Self {
        self.return_tracks.push(track);
        self
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Song for MemorySong {
    fn track_count(&self) -> usize {
        self.tracks.len()
    }

    fn track(&self, index: usize) -> Option<&dyn Track> {
        self.tracks.get(index).map(|t| t as &dyn Track)
    }

    fn track_mut(&mut self, index: usize) -> Option<&mut dyn Track> {
        self.tracks.get_mut(index).map(|t| t as &mut dyn Track)
    }

    fn return_track_count(&self) -> usize {
        self.return_tracks.len()
    }

    fn return_track(&self, index: usize) -> Option<&dyn Track> {
        self.return_tracks.get(index).map(|t| t as &dyn Track)
    }

    fn return_track_mut(&mut self, index: usize) -> Option<&mut dyn Track> {
        self.return_tracks.get_mut(index).map(|t| t as &mut dyn Track)
    }

    fn master_track(&self) -> &dyn Track {
        &self.master
    }

    fn master_track_mut(&mut self) -> &mut dyn Track {
        &mut self.master
    }

    fn convert_sliced_simpler(&mut self, track: usize, device: usize) -> Result<(), HostError> {
        if !self.supports_simpler_conversion {
            return Err(HostError::Unsupported("sliced_simpler_to_drum_rack"));
        }
        let slot = self
            .tracks
            .get_mut(track)
            .and_then(|t| t.devices.get_mut(device))
            .ok_or_else(|| HostError::Rejected(format!("no device at {}/{}", track, device)))?;
        if slot.class_name != "OriginalSimpler" {
            return Err(HostError::Rejected(format!("'{}' is not a Simpler", slot.name)));
        }
        *slot = MemoryDevice::drum_rack("Drum Rack", Vec::new());
        Ok(())
    }

    fn tempo(&self) -> f64 {
        self.transport.tempo
    }

    fn set_tempo(&mut self, tempo: f64) {
        self.transport.tempo = tempo;
    }

    fn signature(&self) -> (u32, u32) {
        (self.transport.signature_numerator, self.transport.signature_denominator)
    }

    fn is_playing(&self) -> bool {
        self.transport.playing
    }

    fn start_playing(&mut self) {
        self.transport.playing = true;
        self.transport.song_time = 0.0;
    }

    fn stop_playing(&mut self) {
        self.transport.playing = false;
    }

    fn continue_playing(&mut self) {
        self.transport.playing = true;
    }

    fn current_song_time(&self) -> f64 {
        self.transport.song_time
    }

    fn set_current_song_time(&mut self, time: f64) {
        self.transport.song_time = time;
    }

    fn song_length(&self) -> f64 {
        self.transport.song_length
    }

    fn tap_tempo(&mut self) {
        self.transport.taps += 1;
    }

    fn metronome(&self) -> bool {
        self.transport.metronome
    }

    fn set_metronome(&mut self, enabled: bool) {
        self.transport.metronome = enabled;
    }

    fn loop_enabled(&self) -> bool {
        self.transport.loop_enabled
    }

    fn set_loop_enabled(&mut self, enabled: bool) {
        self.transport.loop_enabled = enabled;
    }

    fn loop_start(&self) -> f64 {
        self.transport.loop_start
    }

    fn set_loop_start(&mut self, start: f64) {
        self.transport.loop_start = start;
    }

    fn loop_length(&self) -> f64 {
        self.transport.loop_length
    }

    fn set_loop_length(&mut self, length: f64) {
        self.transport.loop_length = length;
    }

    fn record_mode(&self) -> bool {
        self.transport.record_mode
    }

    fn set_record_mode(&mut self, enabled: bool) {
        self.transport.record_mode = enabled;
    }

    fn arrangement_overdub(&self) -> bool {
        self.transport.arrangement_overdub
    }

    fn set_arrangement_overdub(&mut self, enabled: bool) {
        self.transport.arrangement_overdub = enabled;
    }

    fn session_record(&self) -> bool {
        self.transport.session_record
    }

    fn can_undo(&self) -> bool {
        self.undo_steps > 0
    }

    fn undo(&mut self) {
        if self.undo_steps > 0 {
            self.undo_steps -= 1;
            self.redo_steps += 1;
        }
    }

    fn can_redo(&self) -> bool {
        self.redo_steps > 0
    }

    fn redo(&mut self) {
        if self.redo_steps > 0 {
            self.redo_steps -= 1;
            self.undo_steps += 1;
        }
    }

    fn re_enable_automation(&mut self) {
        self.transport.automation_overridden = false;
    }

    fn cue_points(&self) -> Vec<CuePoint> {
        self.cue_points
            .iter()
            .map(|c| CuePoint { name: c.name.clone(), time: c.time })
            .collect()
    }

    fn set_or_delete_cue(&mut self) {
        let now = self.transport.song_time;
        if let Some(pos) = self.cue_points.iter().position(|c| c.time == now) {
            self.cue_points.remove(pos);
        } else {
            let name = format!("{}", self.cue_points.len() + 1);
            self.cue_points.push(MemoryCue { name, time: now });
        }
    }

    fn can_jump_to_next_cue(&self) -> bool {
        self.cue_points.iter().any(|c| c.time > self.transport.song_time)
    }

    fn jump_to_next_cue(&mut self) {
        let now = self.transport.song_time;
        if let Some(t) = self
            .cue_points
            .iter()
            .map(|c| c.time)
            .filter(|t| *t > now)
            .reduce(f64::min)
        {
            self.transport.song_time = t;
        }
    }

    fn can_jump_to_prev_cue(&self) -> bool {
        self.cue_points.iter().any(|c| c.time < self.transport.song_time)
    }

    fn jump_to_prev_cue(&mut self) {
        let now = self.transport.song_time;
        if let Some(t) = self
            .cue_points
            .iter()
            .map(|c| c.time)
            .filter(|t| *t < now)
            .reduce(f64::max)
        {
            self.transport.song_time = t;
        }
    }

    fn groove_amount(&self) -> f64 {
        self.groove_amount
    }

    fn set_groove_amount(&mut self, amount: f64) {
        self.groove_amount = amount;
    }

    fn groove_count(&self) -> Option<usize> {
        self.grooves.as_ref().map(|g| g.len())
    }

    fn groove(&self, index: usize) -> Option<&dyn Groove> {
        self.grooves.as_ref()?.get(index).map(|g| g as &dyn Groove)
    }

    fn groove_mut(&mut self, index: usize) -> Option<&mut dyn Groove> {
        self.grooves.as_mut()?.get_mut(index).map(|g| g as &mut dyn Groove)
    }
}
