//! Display string → raw value resolution.
//!
//! Enumerated parameters are resolved by label lookup. Everything else is
//! resolved by probing: the host's renderer is asked for the display string of
//! each integer in the parameter's range, lowest first, until one matches the
//! target. The renderer is treated as opaque (log-scaled frequencies, swung
//! note divisions and curve labels all look the same from here), so no
//! inverse is attempted.

use crate::error::{HostError, ResolutionError};
use crate::host::Parameter;

/// Tuning for the probing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveOptions {
    /// Refuse to probe ranges with more integers than this. `None` probes any range.
    pub max_probe_span: Option<u64>,
    /// Log every probe at trace level instead of only the outcome.
    pub trace_probes: bool,
}

/// Strip all whitespace and lowercase, so `"1 / 4"` and `"1/4"` compare equal.
pub fn normalize_display(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether two display strings are equal up to whitespace and case.
pub fn displays_match(a: &str, b: &str) -> bool {
    normalize_display(a) == normalize_display(b)
}

/// Outcome of rendering one probe value.
#[derive(Debug, Clone, PartialEq)]
pub enum Probe {
    Matched,
    NoMatch(String),
    Failed(HostError),
}

/// Render `value` and compare it with an already-normalized target.
pub fn probe(param: &dyn Parameter, value: f64, normalized_target: &str) -> Probe {
    match param.render(value) {
        Ok(rendered) if normalize_display(&rendered) == normalized_target => Probe::Matched,
        Ok(rendered) => Probe::NoMatch(rendered),
        Err(e) => Probe::Failed(e),
    }
}

/// Integer probe bounds for a parameter: `[floor(min), ceil(max)]`.
pub fn probe_range(param: &dyn Parameter) -> (i64, i64) {
    (param.min().floor() as i64, param.max().ceil() as i64)
}

/// Resolve with default options.
pub fn resolve_display_value(param: &dyn Parameter, target: &str) -> Result<f64, ResolutionError> {
    resolve_with(param, target, &ResolveOptions::default())
}

/// Resolve a display string to the raw value the host would render it from.
///
/// Quantized parameters with option labels use label lookup; all others are probed.
pub fn resolve_with(
    param: &dyn Parameter,
    target: &str,
    options: &ResolveOptions,
) -> Result<f64, ResolutionError> {
    log::debug!(
        target: "params::resolve",
        "resolve '{}' for '{}' (quantized={})",
        target,
        param.name(),
        param.is_quantized()
    );
    if param.is_quantized() {
        let items = param.value_items();
        if !items.is_empty() {
            return resolve_option(param, &items, target);
        }
    }
    resolve_by_probing(param, target, options)
}

fn resolve_option(param: &dyn Parameter, items: &[String], target: &str) -> Result<f64, ResolutionError> {
    let step = (param.max() - param.min()) / (items.len().saturating_sub(1).max(1)) as f64;
    let position = items.iter().position(|item| item == target).or_else(|| {
        let lowered = target.to_lowercase();
        items.iter().position(|item| item.to_lowercase() == lowered)
    });
    match position {
        Some(i) => Ok(param.min() + i as f64 * step),
        None => Err(ResolutionError::UnknownOption {
            target: target.to_string(),
            parameter: param.name().to_string(),
            options: items.to_vec(),
        }),
    }
}

fn resolve_by_probing(
    param: &dyn Parameter,
    target: &str,
    options: &ResolveOptions,
) -> Result<f64, ResolutionError> {
    let (low, high) = probe_range(param);
    let no_match = || ResolutionError::NoMatch {
        target: target.to_string(),
        parameter: param.name().to_string(),
        low,
        high,
    };
    if !param.min().is_finite() || !param.max().is_finite() || high < low {
        return Err(no_match());
    }

    // Bounds past the i64 range saturate, so the span can reach 2^64.
    let span = (high as i128 - low as i128 + 1) as u128;
    if let Some(limit) = options.max_probe_span {
        if span > u128::from(limit) {
            return Err(ResolutionError::RangeTooWide {
                target: target.to_string(),
                parameter: param.name().to_string(),
                low,
                high,
                limit,
            });
        }
    }
    if param.min().floor() < i64::MIN as f64 || param.max().ceil() >= i64::MAX as f64 {
        return Err(no_match());
    }

    let wanted = normalize_display(target);
    log::debug!(
        target: "params::resolve",
        "probing '{}' (normalized '{}') over {}..={} for '{}'",
        target,
        wanted,
        low,
        high,
        param.name()
    );
    let mut failures = 0usize;
    for v in low..=high {
        match probe(param, v as f64, &wanted) {
            Probe::Matched => {
                log::debug!(target: "params::resolve", "'{}' matched at {}", target, v);
                return Ok(v as f64);
            }
            Probe::NoMatch(rendered) => {
                if options.trace_probes {
                    log::trace!(target: "params::resolve", "  {} -> '{}'", v, rendered);
                }
            }
            Probe::Failed(e) => {
                failures += 1;
                if options.trace_probes {
                    log::trace!(target: "params::resolve", "  {} -> error: {}", v, e);
                }
            }
        }
    }
    if failures > 0 {
        log::debug!(
            target: "params::resolve",
            "{} of {} probes failed to render for '{}'",
            failures,
            span,
            param.name()
        );
    }
    Err(no_match())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::host::memory::{DisplayFormat, MemoryParameter};

    /// Continuous parameter with an arbitrary renderer that counts its calls.
    struct Probed<F: Fn(f64) -> Result<String, HostError>> {
        min: f64,
        max: f64,
        render: F,
        calls: Cell<usize>,
    }

    impl<F: Fn(f64) -> Result<String, HostError>> Probed<F> {
        fn new(min: f64, max: f64, render: F) -> Self {
            Self { min, max, render, calls: Cell::new(0) }
        }
    }

    impl<F: Fn(f64) -> Result<String, HostError>> Parameter for Probed<F> {
        fn name(&self) -> &str {
            "Probed"
        }
        fn value(&self) -> f64 {
            self.min
        }
        fn set_value(&mut self, _value: f64) {}
        fn min(&self) -> f64 {
            self.min
        }
        fn max(&self) -> f64 {
            self.max
        }
        fn is_quantized(&self) -> bool {
            false
        }
        fn value_items(&self) -> Vec<String> {
            Vec::new()
        }
        fn render(&self, value: f64) -> Result<String, HostError> {
            self.calls.set(self.calls.get() + 1);
            (self.render)(value)
        }
    }

    fn hz(v: f64) -> Result<String, HostError> {
        Ok(format!("{} Hz", v))
    }

    #[test]
    fn normalization_ignores_whitespace_and_case() {
        for s in ["1/4", "1 / 4", "1/4 ", " 1/4", "1\t/4"] {
            assert!(displays_match(s, "1/4"), "{:?}", s);
        }
        assert_eq!(normalize_display(" Hi Cut \n"), "hicut");
        assert!(!displays_match("1/4", "1/8"));
    }

    #[test]
    fn enumerated_labels_map_to_evenly_spaced_values() {
        let p = MemoryParameter::enumerated("Rate", &["1/4", "1/8", "1/16"], 0);
        assert_eq!(resolve_display_value(&p, "1/8").unwrap(), 1.0);
        assert_eq!(resolve_display_value(&p, "1/16").unwrap(), 2.0);
        assert_eq!(resolve_display_value(&p, "1/4").unwrap(), 0.0);
    }

    #[test]
    fn enumerated_labels_scale_to_range() {
        let mut p = MemoryParameter::enumerated("Mode", &["Off", "Low", "Mid", "High"], 0);
        p.min = 10.0;
        p.max = 40.0;
        assert_eq!(resolve_display_value(&p, "Mid").unwrap(), 30.0);
    }

    #[test]
    fn enumerated_miss_lists_options() {
        let p = MemoryParameter::enumerated("Rate", &["1/4", "1/8", "1/16"], 0);
        match resolve_display_value(&p, "1/32") {
            Err(ResolutionError::UnknownOption { options, parameter, .. }) => {
                assert_eq!(options, vec!["1/4", "1/8", "1/16"]);
                assert_eq!(parameter, "Rate");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn exact_label_beats_earlier_case_insensitive_label() {
        let p = MemoryParameter::enumerated("Type", &["LOW", "Low", "High"], 0);
        assert_eq!(resolve_display_value(&p, "Low").unwrap(), 1.0);
        assert_eq!(resolve_display_value(&p, "low").unwrap(), 0.0);
    }

    #[test]
    fn enumerated_lookup_does_not_normalize_whitespace() {
        let p = MemoryParameter::enumerated("Rate", &["1/4", "1/8"], 0);
        assert!(resolve_display_value(&p, "1 / 8").is_err());
    }

    #[test]
    fn single_label_resolves_to_min() {
        let mut p = MemoryParameter::enumerated("Only", &["Solo"], 0);
        p.min = 3.0;
        p.max = 3.0;
        assert_eq!(resolve_display_value(&p, "solo").unwrap(), 3.0);
    }

    #[test]
    fn quantized_without_labels_is_probed() {
        let mut p = MemoryParameter::continuous("Steps", 0.0, 0.0, 8.0)
            .with_display(DisplayFormat::Number { unit: "st".into(), decimals: 0 });
        p.is_quantized = true;
        assert_eq!(resolve_display_value(&p, "5 st").unwrap(), 5.0);
    }

    #[test]
    fn probing_finds_rendered_value() {
        let p = Probed::new(0.0, 10.0, hz);
        assert_eq!(resolve_display_value(&p, "7 hz").unwrap(), 7.0);
        assert_eq!(p.calls.get(), 8);
    }

    #[test]
    fn probing_exhaustion_reports_range() {
        let p = Probed::new(0.0, 10.0, hz);
        match resolve_display_value(&p, "99 hz") {
            Err(ResolutionError::NoMatch { low, high, target, .. }) => {
                assert_eq!((low, high), (0, 10));
                assert_eq!(target, "99 hz");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(p.calls.get(), 11);
    }

    #[test]
    fn probing_prefers_lowest_match() {
        let p = Probed::new(0.0, 5.0, |v| Ok(if v >= 2.0 { "Max".to_string() } else { v.to_string() }));
        assert_eq!(resolve_display_value(&p, "max").unwrap(), 2.0);
    }

    #[test]
    fn failed_probes_are_skipped() {
        let p = Probed::new(0.0, 6.0, |v| {
            if v < 4.0 {
                Err(HostError::Unrenderable(v))
            } else {
                Ok(format!("{}", v))
            }
        });
        assert_eq!(resolve_display_value(&p, "5").unwrap(), 5.0);
        assert_eq!(p.calls.get(), 6);
    }

    #[test]
    fn probe_range_rounds_outward() {
        let p = Probed::new(-0.5, 2.25, hz);
        assert_eq!(probe_range(&p), (-1, 3));
        assert_eq!(resolve_display_value(&p, "-1 Hz").unwrap(), -1.0);
        assert_eq!(resolve_display_value(&p, "3 Hz").unwrap(), 3.0);
    }

    #[test]
    fn probe_outcomes_are_explicit() {
        let p = Probed::new(0.0, 1.0, |v| if v > 0.0 { Ok("On".into()) } else { Err(HostError::Unrenderable(v)) });
        assert_eq!(probe(&p, 1.0, "on"), Probe::Matched);
        assert_eq!(probe(&p, 1.0, "off"), Probe::NoMatch("On".into()));
        assert_eq!(probe(&p, 0.0, "on"), Probe::Failed(HostError::Unrenderable(0.0)));
    }

    #[test]
    fn probe_span_limit() {
        let p = Probed::new(0.0, 100.0, hz);
        let opts = ResolveOptions { max_probe_span: Some(50), trace_probes: false };
        match resolve_with(&p, "7 Hz", &opts) {
            Err(ResolutionError::RangeTooWide { limit, .. }) => assert_eq!(limit, 50),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(p.calls.get(), 0);

        let opts = ResolveOptions { max_probe_span: Some(101), trace_probes: true };
        assert_eq!(resolve_with(&p, "7 Hz", &opts).unwrap(), 7.0);
    }

    #[test]
    fn span_limit_holds_for_bounds_past_i64() {
        let p = Probed::new(-1.0e19, 1.0e19, hz);
        let opts = ResolveOptions { max_probe_span: Some(4096), trace_probes: false };
        match resolve_with(&p, "7 Hz", &opts) {
            Err(ResolutionError::RangeTooWide { low, high, limit, .. }) => {
                assert_eq!((low, high), (i64::MIN, i64::MAX));
                assert_eq!(limit, 4096);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(p.calls.get(), 0);

        let opts = ResolveOptions { max_probe_span: Some(u64::MAX), trace_probes: false };
        assert!(matches!(resolve_with(&p, "7 Hz", &opts), Err(ResolutionError::RangeTooWide { .. })));
        assert_eq!(p.calls.get(), 0);
    }

    #[test]
    fn bounds_past_i64_are_rejected() {
        let p = Probed::new(0.0, 1.0e19, hz);
        assert!(matches!(resolve_display_value(&p, "7 Hz"), Err(ResolutionError::NoMatch { .. })));
        assert_eq!(p.calls.get(), 0);
    }

    #[test]
    fn non_finite_bounds_are_not_probed() {
        let p = Probed::new(0.0, f64::INFINITY, hz);
        assert!(matches!(resolve_display_value(&p, "1 Hz"), Err(ResolutionError::NoMatch { .. })));
        assert_eq!(p.calls.get(), 0);
    }

    #[test]
    fn quantized_round_trip_is_stable() {
        let p = MemoryParameter::enumerated("Rate", &["1/4", "1/8", "1/16", "1/32"], 0);
        for label in ["1/4", "1/8", "1/16", "1/32"] {
            let raw = resolve_display_value(&p, label).unwrap();
            let rendered = p.render(raw).unwrap();
            assert_eq!(resolve_display_value(&p, &rendered).unwrap(), raw);
        }
    }

    #[test]
    fn continuous_round_trip_within_one_step() {
        let p = MemoryParameter::continuous("Rate", 0.0, 0.0, 21.0)
            .with_display(DisplayFormat::Number { unit: "".into(), decimals: 0 });
        let raw = resolve_display_value(&p, "13").unwrap();
        let rendered = p.render(raw).unwrap();
        let again = resolve_display_value(&p, &rendered).unwrap();
        assert!((again - raw).abs() <= 1.0);
    }
}
