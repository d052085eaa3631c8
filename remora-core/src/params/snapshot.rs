//! Read a device's parameters back out.

use remora_types::ParameterSnapshot;

use crate::host::{Device, Parameter};

pub fn snapshot_parameter(index: usize, param: &dyn Parameter) -> ParameterSnapshot {
    let value = param.value();
    let is_quantized = param.is_quantized();
    ParameterSnapshot {
        index,
        name: param.name().to_string(),
        value,
        min: param.min(),
        max: param.max(),
        is_quantized,
        value_items: if is_quantized { param.value_items() } else { Vec::new() },
        display_value: param.render(value).ok(),
    }
}

/// Every parameter of `device`, in device order. Duplicated names are all
/// listed, each with its own position.
pub fn read_parameters(device: &dyn Device) -> Vec<ParameterSnapshot> {
    (0..device.parameter_count())
        .filter_map(|i| device.parameter(i).map(|p| snapshot_parameter(i, p)))
        .collect()
}
