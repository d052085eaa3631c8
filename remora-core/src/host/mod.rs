//! Host object model consumed by the command layer.
//!
//! The host owns the song, its tracks, devices and parameters. Commands borrow
//! the graph for the duration of a single call through these traits and never
//! keep references past it. Every method is expected to be called on the host's
//! command-processing context; nothing here synchronizes.

pub mod memory;

use remora_types::Capabilities;

use crate::error::HostError;

/// One automatable device parameter.
pub trait Parameter {
    fn name(&self) -> &str;
    fn value(&self) -> f64;
    /// Store a raw value. Callers clamp into `[min, max]` first.
    fn set_value(&mut self, value: f64);
    fn min(&self) -> f64;
    fn max(&self) -> f64;
    fn is_quantized(&self) -> bool;
    /// Option labels of an enumerated parameter, in raw-value order.
    fn value_items(&self) -> Vec<String>;
    /// Host rendering of an arbitrary raw value. May fail for values outside
    /// the parameter's domain.
    fn render(&self, value: f64) -> Result<String, HostError>;
    fn is_enabled(&self) -> bool {
        true
    }
}

/// One pad slot of a drum rack.
pub trait DrumPad {
    fn note(&self) -> i32;
    fn name(&self) -> &str;
    fn mute(&self) -> bool;
    fn set_mute(&mut self, mute: bool);
    fn solo(&self) -> bool;
    fn set_solo(&mut self, solo: bool);
    fn chain_count(&self) -> usize;
}

/// Drum-rack view of a device.
pub trait DrumRack {
    fn pad_count(&self) -> usize;
    fn pad(&self, index: usize) -> Option<&dyn DrumPad>;
    fn pad_mut(&mut self, index: usize) -> Option<&mut dyn DrumPad>;
    fn copy_pad(&mut self, _source_note: i32, _dest_note: i32) -> Result<(), HostError> {
        Err(HostError::Unsupported("copy_pad"))
    }
}

/// Rack view of a device: stored macro variations.
pub trait Rack {
    fn variation_count(&self) -> usize;
    /// `-1` when nothing is selected.
    fn selected_variation_index(&self) -> i64;
    fn set_selected_variation_index(&mut self, index: i64);
    fn has_macro_mappings(&self) -> bool;
    fn store_variation(&mut self);
    fn recall_selected_variation(&mut self);
    fn delete_selected_variation(&mut self);
    fn randomize_macros(&mut self);
}

/// One device on a track.
pub trait Device {
    fn name(&self) -> &str;
    fn class_name(&self) -> &str;
    fn class_display_name(&self) -> &str;
    fn capabilities(&self) -> Capabilities;
    fn parameter_count(&self) -> usize;
    fn parameter(&self, index: usize) -> Option<&dyn Parameter>;
    fn parameter_mut(&mut self, index: usize) -> Option<&mut dyn Parameter>;
    fn as_drum_rack(&self) -> Option<&dyn DrumRack> {
        None
    }
    fn as_drum_rack_mut(&mut self) -> Option<&mut dyn DrumRack> {
        None
    }
    fn as_rack(&self) -> Option<&dyn Rack> {
        None
    }
    fn as_rack_mut(&mut self) -> Option<&mut dyn Rack> {
        None
    }
}

/// One track (normal, return or master).
pub trait Track {
    fn name(&self) -> &str;
    fn device_count(&self) -> usize;
    fn device(&self, index: usize) -> Option<&dyn Device>;
    fn device_mut(&mut self, index: usize) -> Option<&mut dyn Device>;
    fn delete_device(&mut self, index: usize) -> Result<(), HostError>;
    fn can_be_armed(&self) -> bool;
    fn is_armed(&self) -> bool;
    fn has_midi_input(&self) -> bool;
    fn has_audio_input(&self) -> bool;
    fn volume(&self) -> f64;
    fn panning(&self) -> f64;
}

/// A marker in the arrangement.
#[derive(Debug, Clone, PartialEq)]
pub struct CuePoint {
    pub name: String,
    pub time: f64,
}

/// One groove in the groove pool.
pub trait Groove {
    fn name(&self) -> &str;
    fn timing_amount(&self) -> f64;
    fn set_timing_amount(&mut self, amount: f64);
    fn quantization_amount(&self) -> f64;
    fn set_quantization_amount(&mut self, amount: f64);
    fn random_amount(&self) -> f64;
    fn set_random_amount(&mut self, amount: f64);
    fn velocity_amount(&self) -> f64;
    fn set_velocity_amount(&mut self, amount: f64);
}

/// The song: track collections plus transport, loop, recording, cue and groove state.
pub trait Song {
    // === Tracks ===
    fn track_count(&self) -> usize;
    fn track(&self, index: usize) -> Option<&dyn Track>;
    fn track_mut(&mut self, index: usize) -> Option<&mut dyn Track>;
    fn return_track_count(&self) -> usize;
    fn return_track(&self, index: usize) -> Option<&dyn Track>;
    fn return_track_mut(&mut self, index: usize) -> Option<&mut dyn Track>;
    fn master_track(&self) -> &dyn Track;
    fn master_track_mut(&mut self) -> &mut dyn Track;

    /// Replace a sliced Simpler on a normal track with an equivalent drum rack.
    fn convert_sliced_simpler(&mut self, _track: usize, _device: usize) -> Result<(), HostError> {
        Err(HostError::Unsupported("sliced_simpler_to_drum_rack"))
    }

    // === Tempo / transport ===
    fn tempo(&self) -> f64;
    fn set_tempo(&mut self, tempo: f64);
    fn signature(&self) -> (u32, u32);
    fn is_playing(&self) -> bool;
    fn start_playing(&mut self);
    fn stop_playing(&mut self);
    fn continue_playing(&mut self);
    fn current_song_time(&self) -> f64;
    fn set_current_song_time(&mut self, time: f64);
    fn song_length(&self) -> f64;
    fn tap_tempo(&mut self);
    fn metronome(&self) -> bool;
    fn set_metronome(&mut self, enabled: bool);

    // === Loop ===
    fn loop_enabled(&self) -> bool;
    fn set_loop_enabled(&mut self, enabled: bool);
    fn loop_start(&self) -> f64;
    fn set_loop_start(&mut self, start: f64);
    fn loop_length(&self) -> f64;
    fn set_loop_length(&mut self, length: f64);

    // === Recording ===
    fn record_mode(&self) -> bool;
    fn set_record_mode(&mut self, enabled: bool);
    fn arrangement_overdub(&self) -> bool;
    fn set_arrangement_overdub(&mut self, enabled: bool);
    fn session_record(&self) -> bool;

    // === Undo / automation ===
    fn can_undo(&self) -> bool;
    fn undo(&mut self);
    fn can_redo(&self) -> bool;
    fn redo(&mut self);
    fn re_enable_automation(&mut self);

    // === Cue points ===
    fn cue_points(&self) -> Vec<CuePoint>;
    fn set_or_delete_cue(&mut self);
    fn can_jump_to_next_cue(&self) -> bool;
    fn jump_to_next_cue(&mut self);
    fn can_jump_to_prev_cue(&self) -> bool;
    fn jump_to_prev_cue(&mut self);

    // === Grooves ===
    fn groove_amount(&self) -> f64;
    fn set_groove_amount(&mut self, amount: f64);
    /// Number of grooves in the pool, or `None` when the host has no groove pool.
    fn groove_count(&self) -> Option<usize>;
    fn groove(&self, index: usize) -> Option<&dyn Groove>;
    fn groove_mut(&mut self, index: usize) -> Option<&mut dyn Groove>;
}
