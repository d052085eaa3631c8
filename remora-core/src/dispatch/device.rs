use remora_types::response::{BatchApplied, DeviceDeleted, DeviceInfo, DeviceParameters, ParameterSet};
use remora_types::{DeviceKind, DeviceRef, SetParameter, SetParametersBatch};

use crate::error::{CommandError, Result};
use crate::host::Song;
use crate::params::address::checked_index;
use crate::params::{
    apply_batch, apply_one, read_parameters, resolve_device, resolve_device_mut, resolve_track_mut,
    ResolveOptions, ValueSpec,
};

/// Full parameter listing of one device.
pub fn get_parameters(song: &dyn Song, device: DeviceRef) -> Result<DeviceParameters> {
    let d = resolve_device(song, device)?.device();
    Ok(DeviceParameters {
        device_name: d.name().to_string(),
        device_type: d.class_name().to_string(),
        parameters: read_parameters(d),
    })
}

/// Set one parameter by name from a raw value or a display string.
pub fn set_parameter(song: &mut dyn Song, cmd: &SetParameter, options: &ResolveOptions) -> Result<ParameterSet> {
    let mut handle = resolve_device_mut(song, cmd.device)?;
    let device_name = handle.name().to_string();
    let spec = ValueSpec::from_parts(cmd.value, cmd.display_value.as_deref());
    let applied = apply_one(handle.device_mut(), &cmd.parameter_name, spec, options)?;
    Ok(ParameterSet {
        device_name,
        parameter_name: applied.name,
        value: applied.value,
        clamped: applied.clamped,
        track_type: cmd.device.track.kind,
        display_value: applied.display_value,
    })
}

/// Set several parameters of one device. Only addressing failures fail the command.
pub fn set_parameters_batch(
    song: &mut dyn Song,
    cmd: &SetParametersBatch,
    options: &ResolveOptions,
) -> Result<BatchApplied> {
    let mut handle = resolve_device_mut(song, cmd.device)?;
    let device_name = handle.name().to_string();
    let results = apply_batch(handle.device_mut(), &cmd.parameters, options);
    Ok(BatchApplied {
        device_name,
        track_type: cmd.device.track.kind,
        count: results.len(),
        results,
    })
}

pub fn get_device_info(song: &dyn Song, device: DeviceRef) -> Result<DeviceInfo> {
    let view = resolve_device(song, device)?;
    let (d, caps) = (view.device(), view.capabilities());
    Ok(DeviceInfo {
        device_name: d.name().to_string(),
        class_name: d.class_name().to_string(),
        class_display_name: d.class_display_name().to_string(),
        device_type: DeviceKind::classify(caps, d.class_name(), d.class_display_name()),
        can_have_drum_pads: caps.drum_pads,
        can_have_chains: caps.chains,
        parameter_count: d.parameter_count(),
    })
}

pub fn delete_device(song: &mut dyn Song, device: DeviceRef) -> Result<DeviceDeleted> {
    let track = resolve_track_mut(song, device.track)?;
    let count = track.device_count();
    let out_of_range = || CommandError::DeviceOutOfRange { index: device.device_index, count };
    let index = checked_index(device.device_index, count).ok_or_else(out_of_range)?;
    let device_name = track.device(index).ok_or_else(out_of_range)?.name().to_string();
    track.delete_device(index)?;
    log::info!(target: "dispatch::device", "deleted '{}' from {}", device_name, device.track);
    Ok(DeviceDeleted {
        deleted: true,
        device_name,
        track_index: device.track.index,
        device_index: device.device_index,
    })
}

#[cfg(test)]
mod tests {
    use remora_types::{BatchItem, TrackAddress, TrackKind};

    use super::*;
    use crate::host::memory::{MemoryDevice, MemoryParameter, MemorySong, MemoryTrack};

    fn song() -> MemorySong {
        let delay = MemoryDevice::new(
            "Echo",
            "Echo",
            vec![
                MemoryParameter::enumerated("Device On", &["Off", "On"], 1),
                MemoryParameter::enumerated("L Sync Rate", &["1/4", "1/8", "1/16"], 0),
                MemoryParameter::continuous("Feedback", 0.5, 0.0, 1.0),
            ],
        );
        MemorySong::new()
            .with_track(MemoryTrack::new("Keys"))
            .with_return_track(MemoryTrack::new("A-Delay").with_device(delay))
    }

    fn on_return(device_index: i64) -> DeviceRef {
        DeviceRef::new(TrackAddress::return_track(0), device_index)
    }

    #[test]
    fn set_parameter_on_return_track_by_display() {
        let mut song = song();
        let cmd = SetParameter {
            device: on_return(0),
            parameter_name: "L Sync Rate".into(),
            value: Some(0.0),
            display_value: Some("1/16".into()),
        };
        let set = set_parameter(&mut song, &cmd, &ResolveOptions::default()).unwrap();
        assert_eq!(set.value, 2.0);
        assert!(!set.clamped);
        assert_eq!(set.track_type, TrackKind::Return);
        assert_eq!(set.display_value.as_deref(), Some("1/16"));
        assert_eq!(song.return_tracks[0].devices[0].parameters[1].value, 2.0);
    }

    #[test]
    fn batch_reports_count_and_kind() {
        let mut song = song();
        let cmd = SetParametersBatch {
            device: on_return(0),
            parameters: vec![BatchItem::raw("Feedback", 2.0), BatchItem::raw("Dry/Wet", 0.5)],
        };
        let applied = set_parameters_batch(&mut song, &cmd, &ResolveOptions::default()).unwrap();
        assert_eq!(applied.count, 2);
        assert_eq!(applied.results[0].clamped, Some(true));
        assert_eq!(applied.results[1].error.as_deref(), Some("not found"));
    }

    #[test]
    fn listing_uses_class_name_as_type() {
        let song = song();
        let listing = get_parameters(&song, on_return(0)).unwrap();
        assert_eq!(listing.device_type, "Echo");
        assert_eq!(listing.parameters.len(), 3);
        assert!(listing.parameters[2].value_items.is_empty());
    }

    #[test]
    fn info_classifies_device() {
        let mut song = song();
        song.tracks[0].devices.push(MemoryDevice::drum_rack("Kit", vec![]));
        let info = get_device_info(&song, DeviceRef::new(TrackAddress::track(0), 0)).unwrap();
        assert_eq!(info.device_type, DeviceKind::DrumMachine);
        assert!(info.can_have_chains);
        assert_eq!(info.parameter_count, 9);
    }

    #[test]
    fn delete_removes_device() {
        let mut song = song();
        let deleted = delete_device(&mut song, on_return(0)).unwrap();
        assert_eq!(deleted.device_name, "Echo");
        assert!(song.return_tracks[0].devices.is_empty());
        assert!(delete_device(&mut song, on_return(0)).is_err());
    }
}
