mod device;
mod drum;
mod local;
mod rack;
mod session;

pub use local::LocalDispatcher;

pub use device::{delete_device, get_device_info, get_parameters, set_parameter, set_parameters_batch};
pub use drum::{copy_drum_pad, get_drum_pads, set_drum_pad, sliced_simpler_to_drum_rack};
pub use rack::{get_macro_values, get_rack_variations, rack_variation_action, set_macro_value, MACRO_COUNT};

use serde::Serialize;
use serde_json::Value;

use remora_types::Command;

use crate::config::Config;
use crate::error::Result;
use crate::host::Song;

fn respond<T: Serialize>(response: T) -> Result<Value> {
    Ok(serde_json::to_value(response)?)
}

/// Execute one command against the host and serialize its response.
///
/// The song is borrowed for the duration of the call only. Errors are logged
/// here and returned unchanged; batch commands report per-item failures in
/// their response instead.
pub fn dispatch_command(command: &Command, song: &mut dyn Song, config: &Config) -> Result<Value> {
    if command.is_query() {
        log::trace!(target: "dispatch", "{}", command.name());
    } else {
        log::debug!(target: "dispatch", "{}", command.name());
    }
    let result = run(command, song, config);
    if let Err(e) = &result {
        log::warn!(target: "dispatch", "{} failed: {}", command.name(), e);
    }
    result
}

fn run(command: &Command, song: &mut dyn Song, config: &Config) -> Result<Value> {
    let options = config.resolve_options();
    match command {
        // --- Devices ---
        Command::GetDeviceParameters(d) => respond(device::get_parameters(song, *d)?),
        Command::SetDeviceParameter(p) => respond(device::set_parameter(song, p, &options)?),
        Command::SetDeviceParametersBatch(b) => {
            respond(device::set_parameters_batch(song, b, &options)?)
        }
        Command::GetDeviceInfo(d) => respond(device::get_device_info(song, *d)?),
        Command::DeleteDevice(d) => respond(device::delete_device(song, *d)?),

        // --- Racks ---
        Command::GetMacroValues(d) => respond(rack::get_macro_values(song, *d)?),
        Command::SetMacroValue(m) => respond(rack::set_macro_value(song, m)?),
        Command::GetRackVariations(d) => respond(rack::get_rack_variations(song, *d)?),
        Command::RackVariationAction(v) => respond(rack::rack_variation_action(song, v)?),

        // --- Drum racks ---
        Command::GetDrumPads(d) => respond(drum::get_drum_pads(song, *d)?),
        Command::SetDrumPad(p) => respond(drum::set_drum_pad(song, p)?),
        Command::CopyDrumPad(c) => respond(drum::copy_drum_pad(song, c)?),
        Command::SlicedSimplerToDrumRack(d) => respond(drum::sliced_simpler_to_drum_rack(song, *d)?),

        // --- Session / transport ---
        Command::GetSessionInfo => respond(session::get_session_info(song)),
        Command::SetTempo { tempo } => respond(session::set_tempo(song, *tempo)?),
        Command::StartPlayback => respond(session::start_playback(song)),
        Command::StopPlayback => respond(session::stop_playback(song)),
        Command::ContinuePlaying => respond(session::continue_playing(song)),
        Command::GetSongTransport => respond(session::get_song_transport(song)),
        Command::SetSongTime { time } => respond(session::set_song_time(song, *time)),
        Command::SetPlaybackPosition { position } => respond(session::set_song_time(song, *position)),
        Command::SetMetronome { enabled } => respond(session::set_metronome(song, *enabled)),
        Command::TapTempo => respond(session::tap_tempo(song)),
        Command::Undo => respond(session::undo(song)),
        Command::Redo => respond(session::redo(song)),
        Command::ReEnableAutomation => respond(session::re_enable_automation(song)),

        // --- Loop ---
        Command::SetSongLoop(update) => respond(session::set_song_loop(song, *update)?),
        Command::GetLoopInfo => respond(session::get_loop_info(song)),
        Command::SetLoopStart { position } => respond(session::set_loop_start(song, *position)),
        Command::SetLoopEnd { position } => respond(session::set_loop_end(song, *position)?),
        Command::SetLoopLength { length } => respond(session::set_loop_length(song, *length)?),

        // --- Recording ---
        Command::SetArrangementOverdub { enabled } => {
            respond(session::set_arrangement_overdub(song, *enabled))
        }
        Command::StartArrangementRecording => respond(session::start_arrangement_recording(song)),
        Command::StopArrangementRecording { stop_playback } => {
            let stop = stop_playback.unwrap_or_else(|| config.stop_playback_with_recording());
            respond(session::stop_arrangement_recording(song, stop))
        }
        Command::GetRecordingStatus => respond(session::get_recording_status(song)),

        // --- Cue points ---
        Command::GetCuePoints => respond(session::get_cue_points(song)),
        Command::SetOrDeleteCue => respond(session::set_or_delete_cue(song)),
        Command::JumpToCue { direction } => respond(session::jump_to_cue(song, *direction)),

        // --- Grooves ---
        Command::GetGroovePool => respond(session::get_groove_pool(song)),
        Command::SetGrooveSettings(update) => respond(session::set_groove_settings(song, update)?),
    }
}
