//! Track and device addressing.

use remora_types::{Capabilities, DeviceRef, TrackAddress, TrackKind};

use crate::error::{CommandError, Result};
use crate::host::{Device, DrumRack, Rack, Song, Track};

/// Convert a signed wire index into a position, if it is within `count`.
pub(crate) fn checked_index(index: i64, count: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|i| *i < count)
}

fn track_out_of_range(address: TrackAddress, count: usize) -> CommandError {
    CommandError::TrackOutOfRange { kind: address.kind, index: address.index, count }
}

fn track_count(song: &dyn Song, kind: TrackKind) -> usize {
    match kind {
        TrackKind::Track => song.track_count(),
        TrackKind::Return => song.return_track_count(),
        TrackKind::Master => 1,
    }
}

/// Resolve a track address. The master track is always valid.
pub fn resolve_track(song: &dyn Song, address: TrackAddress) -> Result<&dyn Track> {
    if address.kind == TrackKind::Master {
        return Ok(song.master_track());
    }
    let count = track_count(song, address.kind);
    let index = checked_index(address.index, count)
        .ok_or_else(|| track_out_of_range(address, count))?;
    let track = match address.kind {
        TrackKind::Return => song.return_track(index),
        _ => song.track(index),
    };
    track.ok_or_else(|| track_out_of_range(address, count))
}

/// Mutable counterpart of [`resolve_track`].
pub fn resolve_track_mut(song: &mut dyn Song, address: TrackAddress) -> Result<&mut dyn Track> {
    if address.kind == TrackKind::Master {
        return Ok(song.master_track_mut());
    }
    let count = track_count(song, address.kind);
    let index = checked_index(address.index, count)
        .ok_or_else(|| track_out_of_range(address, count))?;
    let track = match address.kind {
        TrackKind::Return => song.return_track_mut(index),
        _ => song.track_mut(index),
    };
    track.ok_or_else(|| track_out_of_range(address, count))
}

/// Resolve a device for reading, reading its capability flags once.
pub fn resolve_device(song: &dyn Song, device: DeviceRef) -> Result<DeviceView<'_>> {
    let track = resolve_track(song, device.track)?;
    let count = track.device_count();
    let out_of_range = || CommandError::DeviceOutOfRange { index: device.device_index, count };
    let index = checked_index(device.device_index, count).ok_or_else(out_of_range)?;
    track.device(index).map(DeviceView::new).ok_or_else(out_of_range)
}

/// Resolve a device for mutation, reading its capability flags once.
pub fn resolve_device_mut(song: &mut dyn Song, device: DeviceRef) -> Result<DeviceHandle<'_>> {
    let track = resolve_track_mut(song, device.track)?;
    let count = track.device_count();
    let out_of_range = || CommandError::DeviceOutOfRange { index: device.device_index, count };
    let index = checked_index(device.device_index, count).ok_or_else(out_of_range)?;
    match track.device_mut(index) {
        Some(d) => Ok(DeviceHandle::new(d)),
        None => Err(out_of_range()),
    }
}

fn missing(device: &dyn Device, required: &'static str) -> CommandError {
    CommandError::MissingCapability { device: device.name().to_string(), required }
}

/// A device borrowed read-only from the host graph together with its capabilities.
#[derive(Clone, Copy)]
pub struct DeviceView<'a> {
    device: &'a dyn Device,
    capabilities: Capabilities,
}

impl<'a> DeviceView<'a> {
    pub fn new(device: &'a dyn Device) -> Self {
        Self { device, capabilities: device.capabilities() }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn name(&self) -> &'a str {
        self.device.name()
    }

    pub fn device(&self) -> &'a dyn Device {
        self.device
    }

    /// Rack view; fails with a capability error on non-rack devices.
    pub fn rack(&self) -> Result<&'a dyn Rack> {
        if !self.capabilities.chains {
            return Err(missing(self.device, "rack"));
        }
        self.device.as_rack().ok_or_else(|| missing(self.device, "rack"))
    }

    /// Drum-rack view; fails with a capability error on anything else.
    pub fn drum_rack(&self) -> Result<&'a dyn DrumRack> {
        if !self.capabilities.drum_pads {
            return Err(missing(self.device, "drum rack"));
        }
        self.device.as_drum_rack().ok_or_else(|| missing(self.device, "drum rack"))
    }
}

/// A device borrowed mutably from the host graph together with its capabilities.
///
/// Capabilities are captured when the handle is created; the rack and drum-rack
/// accessors check the captured flags rather than asking the device again.
pub struct DeviceHandle<'a> {
    device: &'a mut dyn Device,
    capabilities: Capabilities,
}

impl<'a> DeviceHandle<'a> {
    pub fn new(device: &'a mut dyn Device) -> Self {
        let capabilities = device.capabilities();
        Self { device, capabilities }
    }

    pub fn name(&self) -> &str {
        self.device.name()
    }

    /// Read-only view sharing this handle's captured capabilities.
    pub fn view(&self) -> DeviceView<'_> {
        DeviceView { device: &*self.device, capabilities: self.capabilities }
    }

    pub fn device_mut(&mut self) -> &mut dyn Device {
        &mut *self.device
    }

    pub fn rack(&self) -> Result<&dyn Rack> {
        self.view().rack()
    }

    pub fn rack_mut(&mut self) -> Result<&mut dyn Rack> {
        if !self.capabilities.chains {
            return Err(missing(&*self.device, "rack"));
        }
        let err = missing(&*self.device, "rack");
        self.device.as_rack_mut().ok_or(err)
    }

    pub fn drum_rack_mut(&mut self) -> Result<&mut dyn DrumRack> {
        if !self.capabilities.drum_pads {
            return Err(missing(&*self.device, "drum rack"));
        }
        let err = missing(&*self.device, "drum rack");
        self.device.as_drum_rack_mut().ok_or(err)
    }
}
