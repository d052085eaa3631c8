//! Resolve, clamp and apply parameter values.

use remora_types::{BatchItem, BatchResult};

use super::index::ParameterIndex;
use super::resolve::{resolve_with, ResolveOptions};
use crate::error::{CommandError, Result};
use crate::host::{Device, Parameter};

/// Clamp into `[min, max]`. Unlike `f64::clamp` this never panics when the
/// host reports `min > max`; `min` wins in that case.
pub fn clamp_value(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// The requested value for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueSpec<'a> {
    Raw(f64),
    Display(&'a str),
}

impl<'a> ValueSpec<'a> {
    /// A display string wins over a raw value; with neither, `0.0`.
    pub fn from_parts(value: Option<f64>, display_value: Option<&'a str>) -> Self {
        match (display_value, value) {
            (Some(display), _) => ValueSpec::Display(display),
            (None, Some(v)) => ValueSpec::Raw(v),
            (None, None) => ValueSpec::Raw(0.0),
        }
    }
}

impl<'a> From<&'a BatchItem> for ValueSpec<'a> {
    fn from(item: &'a BatchItem) -> Self {
        ValueSpec::from_parts(item.value, item.display_value.as_deref())
    }
}

/// Outcome of applying one value.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub name: String,
    /// Raw value before clamping (resolved, when a display string was given).
    pub requested: f64,
    pub value: f64,
    pub clamped: bool,
    /// Host rendering of `value`, if it could be rendered.
    pub display_value: Option<String>,
}

impl From<Applied> for BatchResult {
    fn from(applied: Applied) -> Self {
        BatchResult {
            name: applied.name,
            value: Some(applied.value),
            clamped: Some(applied.clamped),
            display_value: applied.display_value,
            error: None,
        }
    }
}

fn apply_to(param: &mut dyn Parameter, spec: ValueSpec<'_>, options: &ResolveOptions) -> Result<Applied> {
    let requested = match spec {
        ValueSpec::Raw(v) => v,
        ValueSpec::Display(target) => resolve_with(&*param, target, options)?,
    };
    let value = clamp_value(requested, param.min(), param.max());
    param.set_value(value);
    let display_value = match param.render(value) {
        Ok(s) => Some(s),
        Err(e) => {
            log::debug!(target: "params::apply", "no display for '{}' at {}: {}", param.name(), value, e);
            None
        }
    };
    Ok(Applied {
        name: param.name().to_string(),
        requested,
        value,
        clamped: value != requested,
        display_value,
    })
}

fn parameter_at<'d>(device: &'d mut dyn Device, position: Option<usize>, name: &str) -> Result<&'d mut dyn Parameter> {
    let device_name = device.name().to_string();
    position
        .and_then(move |p| device.parameter_mut(p))
        .ok_or(CommandError::ParameterNotFound { name: name.to_string(), device: device_name })
}

/// Set one parameter by name, propagating the first failure.
pub fn apply_one(
    device: &mut dyn Device,
    name: &str,
    spec: ValueSpec<'_>,
    options: &ResolveOptions,
) -> Result<Applied> {
    let position = ParameterIndex::build(device).position(name);
    let param = parameter_at(device, position, name)?;
    let applied = apply_to(param, spec, options)?;
    log::debug!(
        target: "params::apply",
        "'{}' = {} (requested {}, clamped={})",
        applied.name,
        applied.value,
        applied.requested,
        applied.clamped
    );
    Ok(applied)
}

/// Apply every item in order. One result per item, in input order; a missing
/// name or an unresolvable display string only fails that item.
pub fn apply_batch(device: &mut dyn Device, items: &[BatchItem], options: &ResolveOptions) -> Vec<BatchResult> {
    let index = ParameterIndex::build(device);
    let mut results = Vec::with_capacity(items.len());
    for item in items {
        let Some(param) = index.position(&item.name).and_then(|p| device.parameter_mut(p)) else {
            results.push(BatchResult::failed(item.name.clone(), "not found"));
            continue;
        };
        match apply_to(param, ValueSpec::from(item), options) {
            Ok(applied) => results.push(applied.into()),
            Err(e) => {
                log::debug!(target: "params::apply", "batch item '{}' failed: {}", item.name, e);
                results.push(BatchResult::failed(item.name.clone(), e.to_string()));
            }
        }
    }
    let failed = results.iter().filter(|r| r.is_error()).count();
    if failed > 0 {
        log::info!(
            target: "params::apply",
            "batch on '{}': {} of {} items failed",
            device.name(),
            failed,
            results.len()
        );
    }
    results
}
