//! Transport, loop, recording, cue-point and groove-pool commands.
//!
//! These forward to song properties with light validation. Positions are in
//! beats.

use remora_types::response::{
    ArmedTrack, Attempt, AutomationReEnabled, CuePointInfo, CuePoints, CueToggled, GrooveInfo, GroovePool,
    GrooveSettings, LoopBounds, LoopInfo, LoopState, MasterSummary, Metronome, Overdub, Playing, RecordingState,
    RecordingStatus, SessionInfo, SongTime, SongTransport, Tempo,
};
use remora_types::{CueDirection, GrooveUpdate, LoopUpdate};

use crate::error::{CommandError, HostError, Result};
use crate::host::{Groove, Song};
use crate::params::address::checked_index;

// ============================================================================
// Session / transport
// ============================================================================

pub fn get_session_info(song: &dyn Song) -> SessionInfo {
    let (signature_numerator, signature_denominator) = song.signature();
    let master = song.master_track();
    SessionInfo {
        tempo: song.tempo(),
        signature_numerator,
        signature_denominator,
        track_count: song.track_count(),
        return_track_count: song.return_track_count(),
        master_track: MasterSummary {
            name: master.name().to_string(),
            volume: master.volume(),
            panning: master.panning(),
        },
    }
}

pub fn set_tempo(song: &mut dyn Song, tempo: f64) -> Result<Tempo> {
    if !tempo.is_finite() || tempo <= 0.0 {
        return Err(CommandError::InvalidArgument(format!("tempo must be positive, got {}", tempo)));
    }
    song.set_tempo(tempo);
    Ok(Tempo { tempo: song.tempo() })
}

pub fn start_playback(song: &mut dyn Song) -> Playing {
    song.start_playing();
    Playing { playing: song.is_playing(), position: None }
}

pub fn stop_playback(song: &mut dyn Song) -> Playing {
    song.stop_playing();
    Playing { playing: song.is_playing(), position: None }
}

/// Resume from the current position instead of the start.
pub fn continue_playing(song: &mut dyn Song) -> Playing {
    song.continue_playing();
    Playing { playing: song.is_playing(), position: Some(song.current_song_time()) }
}

pub fn get_song_transport(song: &dyn Song) -> SongTransport {
    let (signature_numerator, signature_denominator) = song.signature();
    SongTransport {
        current_time: song.current_song_time(),
        is_playing: song.is_playing(),
        tempo: song.tempo(),
        signature_numerator,
        signature_denominator,
        loop_enabled: song.loop_enabled(),
        loop_start: song.loop_start(),
        loop_length: song.loop_length(),
        song_length: song.song_length(),
        record_mode: song.record_mode(),
    }
}

/// Move the playhead. Negative positions are clamped to 0.
pub fn set_song_time(song: &mut dyn Song, time: f64) -> SongTime {
    let target = time.max(0.0);
    song.set_current_song_time(target);
    SongTime { current_time: target }
}

pub fn set_metronome(song: &mut dyn Song, enabled: bool) -> Metronome {
    song.set_metronome(enabled);
    Metronome { metronome: song.metronome() }
}

pub fn tap_tempo(song: &mut dyn Song) -> Tempo {
    song.tap_tempo();
    Tempo { tempo: song.tempo() }
}

pub fn undo(song: &mut dyn Song) -> Attempt {
    if !song.can_undo() {
        return Attempt::refused("Nothing to undo");
    }
    song.undo();
    Attempt::done()
}

pub fn redo(song: &mut dyn Song) -> Attempt {
    if !song.can_redo() {
        return Attempt::refused("Nothing to redo");
    }
    song.redo();
    Attempt::done()
}

pub fn re_enable_automation(song: &mut dyn Song) -> AutomationReEnabled {
    song.re_enable_automation();
    AutomationReEnabled { re_enabled: true }
}

// ============================================================================
// Loop
// ============================================================================

fn positive_length(length: f64) -> Result<f64> {
    if length.is_finite() && length > 0.0 {
        Ok(length)
    } else {
        Err(CommandError::InvalidArgument(format!("loop length must be positive, got {}", length)))
    }
}

fn loop_bounds(song: &dyn Song) -> LoopBounds {
    LoopBounds {
        loop_start: song.loop_start(),
        loop_end: song.loop_start() + song.loop_length(),
        loop_length: None,
    }
}

/// Update any of the loop switch, start and length. Echoes the values set
/// rather than reading them back.
pub fn set_song_loop(song: &mut dyn Song, update: LoopUpdate) -> Result<LoopState> {
    let length = update.length.map(positive_length).transpose()?;
    let start = update.start.map(|s| s.max(0.0));
    if let Some(enabled) = update.enabled {
        song.set_loop_enabled(enabled);
    }
    if let Some(start) = start {
        song.set_loop_start(start);
    }
    if let Some(length) = length {
        song.set_loop_length(length);
    }
    Ok(LoopState {
        loop_enabled: update.enabled.unwrap_or_else(|| song.loop_enabled()),
        loop_start: start.unwrap_or_else(|| song.loop_start()),
        loop_length: length.unwrap_or_else(|| song.loop_length()),
    })
}

pub fn get_loop_info(song: &dyn Song) -> LoopInfo {
    LoopInfo {
        loop_start: song.loop_start(),
        loop_end: song.loop_start() + song.loop_length(),
        loop_length: song.loop_length(),
        enabled: song.loop_enabled(),
        current_song_time: song.current_song_time(),
    }
}

/// Move the loop start, keeping its length. Negative positions are clamped to 0.
pub fn set_loop_start(song: &mut dyn Song, position: f64) -> LoopBounds {
    song.set_loop_start(position.max(0.0));
    loop_bounds(song)
}

/// Move the loop end by changing the loop length.
pub fn set_loop_end(song: &mut dyn Song, position: f64) -> Result<LoopBounds> {
    let start = song.loop_start();
    if position.is_nan() || position <= start {
        return Err(CommandError::InvalidArgument(format!(
            "loop end ({}) must be greater than loop start ({})",
            position, start
        )));
    }
    song.set_loop_length(position - start);
    Ok(loop_bounds(song))
}

pub fn set_loop_length(song: &mut dyn Song, length: f64) -> Result<LoopBounds> {
    song.set_loop_length(positive_length(length)?);
    Ok(LoopBounds { loop_length: Some(song.loop_length()), ..loop_bounds(song) })
}

// ============================================================================
// Recording
// ============================================================================

pub fn set_arrangement_overdub(song: &mut dyn Song, enabled: bool) -> Overdub {
    song.set_arrangement_overdub(enabled);
    Overdub { arrangement_overdub: song.arrangement_overdub() }
}

/// Arm arrangement recording, starting playback if it is stopped.
pub fn start_arrangement_recording(song: &mut dyn Song) -> RecordingState {
    song.set_record_mode(true);
    if !song.is_playing() {
        song.start_playing();
    }
    RecordingState {
        recording: song.record_mode(),
        playing: song.is_playing(),
        arrangement_overdub: Some(song.arrangement_overdub()),
    }
}

pub fn stop_arrangement_recording(song: &mut dyn Song, stop_playback: bool) -> RecordingState {
    song.set_record_mode(false);
    if stop_playback && song.is_playing() {
        song.stop_playing();
    }
    RecordingState { recording: song.record_mode(), playing: song.is_playing(), arrangement_overdub: None }
}

/// Recording switches plus the armed normal tracks.
pub fn get_recording_status(song: &dyn Song) -> RecordingStatus {
    let armed_tracks: Vec<ArmedTrack> = (0..song.track_count())
        .filter_map(|i| song.track(i).map(|t| (i, t)))
        .filter(|(_, t)| t.can_be_armed() && t.is_armed())
        .map(|(index, t)| ArmedTrack {
            index,
            name: t.name().to_string(),
            is_midi: t.has_midi_input(),
            is_audio: t.has_audio_input(),
        })
        .collect();
    RecordingStatus {
        record_mode: song.record_mode(),
        arrangement_overdub: song.arrangement_overdub(),
        session_record: song.session_record(),
        is_playing: song.is_playing(),
        armed_track_count: armed_tracks.len(),
        armed_tracks,
    }
}

// ============================================================================
// Cue points
// ============================================================================

pub fn get_cue_points(song: &dyn Song) -> CuePoints {
    let mut cue_points: Vec<CuePointInfo> = song
        .cue_points()
        .into_iter()
        .map(|c| CuePointInfo { name: c.name, time: c.time })
        .collect();
    cue_points.sort_by(|a, b| a.time.total_cmp(&b.time));
    CuePoints { count: cue_points.len(), cue_points }
}

/// Toggle a cue point at the playhead.
pub fn set_or_delete_cue(song: &mut dyn Song) -> CueToggled {
    song.set_or_delete_cue();
    CueToggled { position: song.current_song_time() }
}

pub fn jump_to_cue(song: &mut dyn Song, direction: CueDirection) -> Attempt {
    match direction {
        CueDirection::Next => {
            if !song.can_jump_to_next_cue() {
                return Attempt::refused("No next cue point");
            }
            song.jump_to_next_cue();
        }
        CueDirection::Prev => {
            if !song.can_jump_to_prev_cue() {
                return Attempt::refused("No previous cue point");
            }
            song.jump_to_prev_cue();
        }
    }
    Attempt::done().at(song.current_song_time())
}

// ============================================================================
// Grooves
// ============================================================================

fn groove_info(index: usize, groove: &dyn Groove) -> GrooveInfo {
    GrooveInfo {
        index,
        name: groove.name().to_string(),
        timing_amount: groove.timing_amount(),
        quantization_amount: groove.quantization_amount(),
        random_amount: groove.random_amount(),
        velocity_amount: groove.velocity_amount(),
    }
}

/// Global groove amount and every groove in the pool. A host without a pool
/// reports an empty one.
pub fn get_groove_pool(song: &dyn Song) -> GroovePool {
    let count = song.groove_count().unwrap_or(0);
    let grooves: Vec<GrooveInfo> = (0..count).filter_map(|i| song.groove(i).map(|g| groove_info(i, g))).collect();
    GroovePool { groove_amount: song.groove_amount(), groove_count: grooves.len(), grooves }
}

/// Set the global groove amount and/or the amounts of one groove. All
/// arguments are validated before anything is changed.
pub fn set_groove_settings(song: &mut dyn Song, update: &GrooveUpdate) -> Result<GrooveSettings> {
    if update.groove_index.is_none() && update.has_groove_fields() {
        return Err(CommandError::InvalidArgument("groove_index is required to change a groove's amounts".into()));
    }
    if update.groove_amount.is_none() && update.groove_index.is_none() {
        return Err(CommandError::InvalidArgument("no groove settings specified".into()));
    }
    let target = match update.groove_index {
        Some(index) => {
            let count = song.groove_count().ok_or(HostError::Unsupported("groove pool"))?;
            let out_of_range = || CommandError::IndexOutOfRange { what: "groove", index, count };
            Some((checked_index(index, count).ok_or_else(out_of_range)?, out_of_range()))
        }
        None => None,
    };

    let mut settings = GrooveSettings::default();
    if let Some(amount) = update.groove_amount {
        song.set_groove_amount(amount);
        settings.groove_amount = Some(song.groove_amount());
    }
    if let Some((position, missing)) = target {
        let groove = song.groove_mut(position).ok_or(missing)?;
        if let Some(v) = update.timing_amount {
            groove.set_timing_amount(v);
        }
        if let Some(v) = update.quantization_amount {
            groove.set_quantization_amount(v);
        }
        if let Some(v) = update.random_amount {
            groove.set_random_amount(v);
        }
        if let Some(v) = update.velocity_amount {
            groove.set_velocity_amount(v);
        }
        let info = groove_info(position, &*groove);
        settings.groove_index = Some(info.index);
        settings.groove_name = Some(info.name);
        settings.timing_amount = Some(info.timing_amount);
        settings.quantization_amount = Some(info.quantization_amount);
        settings.random_amount = Some(info.random_amount);
        settings.velocity_amount = Some(info.velocity_amount);
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::host::memory::{MemoryGroove, MemorySong, MemoryTrack};

    #[test]
    fn loop_length_must_be_positive() {
        let mut song = MemorySong::new();
        let update = LoopUpdate { enabled: Some(true), start: Some(4.0), length: Some(0.0) };
        assert_eq!(set_song_loop(&mut song, update).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert!(!song.transport.loop_enabled);
        assert_eq!(song.transport.loop_start, 0.0);

        let update = LoopUpdate { enabled: None, start: Some(-2.0), length: Some(8.0) };
        let state = set_song_loop(&mut song, update).unwrap();
        assert_eq!(state.loop_start, 0.0);
        assert_eq!(state.loop_length, 8.0);
        assert!(!state.loop_enabled);
    }

    #[test]
    fn loop_end_sets_length() {
        let mut song = MemorySong::new();
        set_loop_start(&mut song, 8.0);
        let bounds = set_loop_end(&mut song, 12.0).unwrap();
        assert_eq!(bounds.loop_end, 12.0);
        assert_eq!(song.transport.loop_length, 4.0);
        assert!(set_loop_end(&mut song, 8.0).is_err());
        assert!(set_loop_length(&mut song, -1.0).is_err());
        assert_eq!(set_loop_length(&mut song, 2.0).unwrap().loop_length, Some(2.0));
    }

    #[test]
    fn recording_starts_playback() {
        let mut song = MemorySong::new();
        let state = start_arrangement_recording(&mut song);
        assert!(state.recording && state.playing);
        let state = stop_arrangement_recording(&mut song, false);
        assert!(!state.recording);
        assert!(state.playing);
        let state = stop_arrangement_recording(&mut song, true);
        assert!(!state.playing);
    }

    #[test]
    fn armed_tracks_only() {
        let mut armed = MemoryTrack::new("Vox");
        armed.armed = true;
        armed.has_audio_input = true;
        let mut unarmable = MemoryTrack::new("Group");
        unarmable.armed = true;
        unarmable.can_be_armed = false;
        let song = MemorySong::new().with_track(MemoryTrack::new("Keys")).with_track(armed).with_track(unarmable);
        let status = get_recording_status(&song);
        assert_eq!(status.armed_track_count, 1);
        assert_eq!(status.armed_tracks[0].index, 1);
        assert!(status.armed_tracks[0].is_audio);
    }

    #[test]
    fn undo_and_jump_refusals() {
        let mut song = MemorySong::new();
        assert_eq!(undo(&mut song), Attempt::refused("Nothing to undo"));
        song.undo_steps = 1;
        assert_eq!(undo(&mut song), Attempt::done());
        assert_eq!(redo(&mut song), Attempt::done());
        assert_eq!(jump_to_cue(&mut song, CueDirection::Next), Attempt::refused("No next cue point"));
    }

    #[test]
    fn cues_sorted_by_time() {
        let mut song = MemorySong::new();
        for t in [16.0, 4.0, 8.0] {
            set_song_time(&mut song, t);
            set_or_delete_cue(&mut song);
        }
        let cues = get_cue_points(&song);
        let times: Vec<f64> = cues.cue_points.iter().map(|c| c.time).collect();
        assert_eq!(times, vec![4.0, 8.0, 16.0]);
        set_song_time(&mut song, 0.0);
        assert_eq!(jump_to_cue(&mut song, CueDirection::Next), Attempt::done().at(4.0));
    }

    #[test]
    fn groove_settings_validation() {
        let mut song = MemorySong::new();
        song.grooves = Some(vec![MemoryGroove::new("MPC 16 Swing-56")]);

        let empty = GrooveUpdate::default();
        assert_eq!(set_groove_settings(&mut song, &empty).unwrap_err().kind(), ErrorKind::InvalidArgument);

        let orphan = GrooveUpdate { timing_amount: Some(0.5), ..GrooveUpdate::default() };
        assert_eq!(set_groove_settings(&mut song, &orphan).unwrap_err().kind(), ErrorKind::InvalidArgument);

        let bad = GrooveUpdate { groove_amount: Some(0.3), groove_index: Some(3), ..GrooveUpdate::default() };
        assert_eq!(set_groove_settings(&mut song, &bad).unwrap_err().kind(), ErrorKind::Addressing);
        assert_eq!(song.groove_amount, 1.0);

        let good = GrooveUpdate { groove_index: Some(0), random_amount: Some(0.25), ..GrooveUpdate::default() };
        let settings = set_groove_settings(&mut song, &good).unwrap();
        assert_eq!(settings.groove_name.as_deref(), Some("MPC 16 Swing-56"));
        assert_eq!(settings.random_amount, Some(0.25));
        assert_eq!(settings.groove_amount, None);

        song.grooves = None;
        let any = GrooveUpdate { groove_index: Some(0), ..GrooveUpdate::default() };
        assert_eq!(set_groove_settings(&mut song, &any).unwrap_err().kind(), ErrorKind::Unsupported);
        assert_eq!(get_groove_pool(&song).groove_count, 0);
    }

    #[test]
    fn tempo_must_be_positive() {
        let mut song = MemorySong::new();
        assert!(set_tempo(&mut song, 0.0).is_err());
        assert_eq!(set_tempo(&mut song, 128.0).unwrap().tempo, 128.0);
    }
}
