//! Name lookup over one device's parameter list.

use std::collections::HashMap;

use crate::host::Device;

/// Maps parameter names to their position on a device.
///
/// Built fresh for each command since the host may add, remove or rename
/// parameters between calls. When two parameters share a name the first one
/// in device order wins; later duplicates are only reachable by position
/// (see [`super::snapshot::read_parameters`]).
#[derive(Debug, Clone, Default)]
pub struct ParameterIndex {
    by_name: HashMap<String, usize>,
}

impl ParameterIndex {
    pub fn build(device: &dyn Device) -> Self {
        let count = device.parameter_count();
        let mut by_name = HashMap::with_capacity(count);
        for position in 0..count {
            let Some(param) = device.parameter(position) else {
                continue;
            };
            if let Some(first) = by_name.get(param.name()) {
                log::debug!(
                    target: "params::index",
                    "'{}' on '{}': position {} shadowed by {}",
                    param.name(),
                    device.name(),
                    position,
                    first
                );
                continue;
            }
            by_name.insert(param.name().to_string(), position);
        }
        Self { by_name }
    }

    /// Position of the first parameter with this exact name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryDevice, MemoryParameter};

    #[test]
    fn first_duplicate_wins() {
        let device = MemoryDevice::new(
            "Operator",
            "Operator",
            vec![
                MemoryParameter::continuous("Device On", 1.0, 0.0, 1.0),
                MemoryParameter::continuous("Level", 0.2, 0.0, 1.0),
                MemoryParameter::continuous("Level", 0.9, 0.0, 1.0),
            ],
        );
        let index = ParameterIndex::build(&device);
        assert_eq!(index.position("Level"), Some(1));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn lookup_is_exact() {
        let device = MemoryDevice::new(
            "Auto Filter",
            "AutoFilter",
            vec![MemoryParameter::continuous("Frequency", 0.5, 0.0, 1.0)],
        );
        let index = ParameterIndex::build(&device);
        assert!(index.contains("Frequency"));
        assert_eq!(index.position("frequency"), None);
        assert_eq!(index.position("Resonance"), None);
    }

    #[test]
    fn empty_device_has_empty_index() {
        let device = MemoryDevice::new("Utility", "StereoGain", vec![]);
        assert!(ParameterIndex::build(&device).is_empty());
    }
}
