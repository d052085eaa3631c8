//! Parameter snapshots and batch items.

use serde::{Deserialize, Serialize};

/// Read-only description of one device parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    /// Position in the device's parameter list. The only way to reach a
    /// parameter whose name is shadowed by an earlier duplicate.
    pub index: usize,
    pub name: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub is_quantized: bool,
    /// Option labels; empty unless the parameter is quantized.
    pub value_items: Vec<String>,
    /// Host rendering of the current value. Absent when the host could not render it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
}

/// One entry of a batch parameter update.
///
/// When `display_value` is present it wins over `value`. When neither is
/// present the value defaults to `0.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, alias = "value_display", skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
}

impl BatchItem {
    pub fn raw(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), value: Some(value), display_value: None }
    }

    pub fn display(name: impl Into<String>, display_value: impl Into<String>) -> Self {
        Self { name: name.into(), value: None, display_value: Some(display_value.into()) }
    }
}

/// Outcome of one batch entry. Either `error` is set, or `value`/`clamped`
/// are, with `display_value` present when the host could render the result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clamped: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchResult {
    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self { name: name.into(), error: Some(error.into()), ..Self::default() }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
