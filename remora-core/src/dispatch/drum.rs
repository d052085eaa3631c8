//! Drum-rack pads and Simpler conversion.

use remora_types::response::{DrumPads, PadCopied, PadInfo, PadState, SimplerConverted};
use remora_types::{CopyDrumPad, DeviceRef, PadNote, SetDrumPad, TrackKind};

use crate::error::{CommandError, Result};
use crate::host::{DrumRack, Song};
use crate::params::{resolve_device, resolve_device_mut};

fn pad_position(rack: &dyn DrumRack, note: PadNote) -> Option<usize> {
    (0..rack.pad_count()).find(|i| rack.pad(*i).is_some_and(|p| p.note() == note.get()))
}

fn pad_name(rack: &dyn DrumRack, note: PadNote) -> String {
    pad_position(rack, note)
        .and_then(|i| rack.pad(i))
        .map(|p| p.name().to_string())
        .unwrap_or_default()
}

pub fn get_drum_pads(song: &dyn Song, device: DeviceRef) -> Result<DrumPads> {
    let view = resolve_device(song, device)?;
    let rack = view.drum_rack()?;
    let pads: Vec<PadInfo> = (0..rack.pad_count())
        .filter_map(|i| rack.pad(i))
        .map(|p| PadInfo {
            note: PadNote::new(p.note()),
            name: p.name().to_string(),
            mute: p.mute(),
            solo: p.solo(),
            has_chains: p.chain_count() > 0,
        })
        .collect();
    Ok(DrumPads {
        device_name: view.name().to_string(),
        track_index: device.track.index,
        device_index: device.device_index,
        pad_count: pads.len(),
        pads,
    })
}

/// Mute and/or solo the pad for one MIDI note.
pub fn set_drum_pad(song: &mut dyn Song, cmd: &SetDrumPad) -> Result<PadState> {
    let mut handle = resolve_device_mut(song, cmd.device)?;
    let rack = handle.drum_rack_mut()?;
    let pad = pad_position(&*rack, cmd.note)
        .and_then(|i| rack.pad_mut(i))
        .ok_or_else(|| CommandError::NotFound(format!("no drum pad found for MIDI note {}", cmd.note)))?;
    if let Some(mute) = cmd.mute {
        pad.set_mute(mute);
    }
    if let Some(solo) = cmd.solo {
        pad.set_solo(solo);
    }
    Ok(PadState { note: cmd.note, name: pad.name().to_string(), mute: pad.mute(), solo: pad.solo() })
}

pub fn copy_drum_pad(song: &mut dyn Song, cmd: &CopyDrumPad) -> Result<PadCopied> {
    let mut handle = resolve_device_mut(song, cmd.device)?;
    let rack = handle.drum_rack_mut()?;
    rack.copy_pad(cmd.source_note.get(), cmd.dest_note.get())?;
    Ok(PadCopied {
        source_note: cmd.source_note,
        source_name: pad_name(&*rack, cmd.source_note),
        dest_note: cmd.dest_note,
        dest_name: pad_name(&*rack, cmd.dest_note),
        copied: true,
    })
}

/// Replace a sliced Simpler with a drum rack. Only devices on normal tracks can be converted.
pub fn sliced_simpler_to_drum_rack(song: &mut dyn Song, device: DeviceRef) -> Result<SimplerConverted> {
    let source_device = resolve_device(&*song, device)?.name().to_string();
    if device.track.kind != TrackKind::Track {
        return Err(CommandError::InvalidArgument(format!(
            "sliced Simpler conversion needs a device on a normal track, not a {} track",
            device.track.kind
        )));
    }
    // Both indices were validated by resolve_device above.
    let (track, index) = (device.track.index as usize, device.device_index as usize);
    song.convert_sliced_simpler(track, index)?;
    log::info!(target: "dispatch::drum", "converted '{}' on {} to a drum rack", source_device, device.track);
    Ok(SimplerConverted { converted: true, source_device, track_index: device.track.index })
}

#[cfg(test)]
mod tests {
    use remora_types::TrackAddress;

    use super::*;
    use crate::error::ErrorKind;
    use crate::host::memory::{MemoryDevice, MemoryDrumPad, MemorySong, MemoryTrack};

    fn song() -> MemorySong {
        let mut kick = MemoryDrumPad::new(36, "Kick");
        kick.chain_count = 1;
        let kit = MemoryDevice::drum_rack(
            "808 Core Kit",
            vec![kick, MemoryDrumPad::new(38, "Snare"), MemoryDrumPad::new(42, "")],
        );
        MemorySong::new().with_track(
            MemoryTrack::new("Drums")
                .with_device(kit)
                .with_device(MemoryDevice::new("Simpler", "OriginalSimpler", vec![])),
        )
    }

    fn at(device_index: i64) -> DeviceRef {
        DeviceRef::new(TrackAddress::track(0), device_index)
    }

    #[test]
    fn lists_pads() {
        let song = song();
        let pads = get_drum_pads(&song, at(0)).unwrap();
        assert_eq!(pads.pad_count, 3);
        assert!(pads.pads[0].has_chains);
        assert!(!pads.pads[1].has_chains);

        let err = get_drum_pads(&song, at(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capability);
    }

    #[test]
    fn set_pad_by_note() {
        let mut song = song();
        let cmd = SetDrumPad { device: at(0), note: PadNote::new(38), mute: Some(true), solo: None };
        let state = set_drum_pad(&mut song, &cmd).unwrap();
        assert_eq!(state.name, "Snare");
        assert!(state.mute);
        assert!(!state.solo);

        let cmd = SetDrumPad { device: at(0), note: PadNote::new(50), mute: None, solo: Some(true) };
        assert_eq!(set_drum_pad(&mut song, &cmd).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn copy_pad_reports_names() {
        let mut song = song();
        let cmd = CopyDrumPad { device: at(0), source_note: PadNote::new(36), dest_note: PadNote::new(42) };
        let copied = copy_drum_pad(&mut song, &cmd).unwrap();
        assert_eq!(copied.dest_name, "Kick");

        song.tracks[0].devices[0].drum_rack.as_mut().unwrap().supports_copy = false;
        assert_eq!(copy_drum_pad(&mut song, &cmd).unwrap_err().kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn simpler_conversion() {
        let mut song = song();
        assert_eq!(sliced_simpler_to_drum_rack(&mut song, at(1)).unwrap_err().kind(), ErrorKind::Unsupported);

        song.supports_simpler_conversion = true;
        let converted = sliced_simpler_to_drum_rack(&mut song, at(1)).unwrap();
        assert_eq!(converted.source_device, "Simpler");
        assert!(song.tracks[0].devices[1].drum_rack.is_some());

        let master = DeviceRef::new(TrackAddress::master(), 0);
        assert_eq!(sliced_simpler_to_drum_rack(&mut song, master).unwrap_err().kind(), ErrorKind::Addressing);
    }
}
