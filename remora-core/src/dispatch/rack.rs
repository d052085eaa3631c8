//! Rack macros and macro variations.

use remora_types::response::{MacroInfo, MacroSet, MacroValues, RackVariations, VariationApplied};
use remora_types::{DeviceRef, RackVariation, SetMacro, VariationAction};

use crate::error::{CommandError, Result};
use crate::host::Song;
use crate::params::{clamp_value, resolve_device, resolve_device_mut};

/// Macros occupy parameters `1..=MACRO_COUNT`; parameter 0 is the device-on switch.
pub const MACRO_COUNT: usize = 8;

pub fn get_macro_values(song: &dyn Song, device: DeviceRef) -> Result<MacroValues> {
    let view = resolve_device(song, device)?;
    view.rack()?;
    let d = view.device();
    let macros = (0..MACRO_COUNT)
        .filter_map(|i| {
            d.parameter(i + 1).map(|p| MacroInfo {
                index: i,
                name: p.name().to_string(),
                value: p.value(),
                min: p.min(),
                max: p.max(),
                is_enabled: p.is_enabled(),
            })
        })
        .collect();
    Ok(MacroValues {
        track_index: device.track.index,
        device_index: device.device_index,
        device_name: d.name().to_string(),
        macros,
    })
}

pub fn set_macro_value(song: &mut dyn Song, cmd: &SetMacro) -> Result<MacroSet> {
    let mut handle = resolve_device_mut(song, cmd.device)?;
    handle.rack()?;
    let position = usize::try_from(cmd.macro_index)
        .ok()
        .filter(|i| *i < MACRO_COUNT)
        .ok_or_else(|| {
            CommandError::InvalidArgument(format!(
                "macro index must be 0-{}, got {}",
                MACRO_COUNT - 1,
                cmd.macro_index
            ))
        })?
        + 1;
    let device_name = handle.name().to_string();
    let param = handle.device_mut().parameter_mut(position).ok_or_else(|| {
        CommandError::NotFound(format!("macro {} not available on '{}'", cmd.macro_index + 1, device_name))
    })?;
    let value = clamp_value(cmd.value, param.min(), param.max());
    param.set_value(value);
    Ok(MacroSet {
        track_index: cmd.device.track.index,
        device_index: cmd.device.device_index,
        macro_index: cmd.macro_index,
        macro_name: param.name().to_string(),
        value,
    })
}

pub fn get_rack_variations(song: &dyn Song, device: DeviceRef) -> Result<RackVariations> {
    let view = resolve_device(song, device)?;
    let rack = view.rack()?;
    Ok(RackVariations {
        device_name: view.name().to_string(),
        track_index: device.track.index,
        device_index: device.device_index,
        variation_count: rack.variation_count(),
        selected_variation_index: rack.selected_variation_index(),
        has_macro_mappings: rack.has_macro_mappings(),
    })
}

/// Store, recall, delete or randomize. Recall and delete select `variation_index` first.
pub fn rack_variation_action(song: &mut dyn Song, cmd: &RackVariation) -> Result<VariationApplied> {
    let mut handle = resolve_device_mut(song, cmd.device)?;
    let device_name = handle.name().to_string();
    let rack = handle.rack_mut()?;
    let mut applied = VariationApplied {
        device_name,
        action: cmd.action.to_string(),
        variation_count: None,
        selected_variation_index: None,
        randomized: None,
    };

    if cmd.action.needs_index() {
        let index = cmd.variation_index.ok_or_else(|| {
            CommandError::InvalidArgument(format!("variation_index is required for '{}'", cmd.action))
        })?;
        rack.set_selected_variation_index(index);
    }

    match cmd.action {
        VariationAction::Store => {
            rack.store_variation();
            applied.variation_count = Some(rack.variation_count());
            applied.selected_variation_index = Some(rack.selected_variation_index());
        }
        VariationAction::Recall => {
            rack.recall_selected_variation();
            applied.selected_variation_index = Some(rack.selected_variation_index());
        }
        VariationAction::Delete => {
            rack.delete_selected_variation();
            applied.variation_count = Some(rack.variation_count());
        }
        VariationAction::Randomize => {
            rack.randomize_macros();
            applied.randomized = Some(true);
        }
    }
    log::debug!(target: "dispatch::rack", "{} on '{}'", cmd.action, applied.device_name);
    Ok(applied)
}
