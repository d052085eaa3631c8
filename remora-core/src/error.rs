//! Error types for command dispatch and parameter resolution.

use remora_types::TrackKind;
use thiserror::Error;

/// Failure reported by the host object model itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// The host does not implement an optional feature.
    #[error("{0} is not available on this host")]
    Unsupported(&'static str),

    /// The host could not render a value as a display string.
    #[error("cannot render value {0}")]
    Unrenderable(f64),

    /// The host refused the operation.
    #[error("{0}")]
    Rejected(String),
}

/// A display string that could not be turned into a raw value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    /// Enumerated parameter with no label matching the target.
    #[error("'{target}' not found in value_items for '{parameter}'. Options: {}", .options.join(", "))]
    UnknownOption {
        target: String,
        parameter: String,
        options: Vec<String>,
    },

    /// Continuous parameter whose probe range never rendered the target.
    #[error("'{target}' not matched for '{parameter}' (range {low}-{high})")]
    NoMatch {
        target: String,
        parameter: String,
        low: i64,
        high: i64,
    },

    /// Continuous parameter whose probe range exceeds the configured cap.
    #[error("'{target}' cannot be resolved for '{parameter}': range {low}-{high} exceeds the probe limit of {limit}")]
    RangeTooWide {
        target: String,
        parameter: String,
        low: i64,
        high: i64,
        limit: u64,
    },
}

/// Coarse error classification, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Addressing,
    NotFound,
    ValueResolution,
    Capability,
    InvalidArgument,
    Unsupported,
    Encoding,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Addressing => "addressing",
            ErrorKind::NotFound => "not_found",
            ErrorKind::ValueResolution => "value_resolution",
            ErrorKind::Capability => "capability",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Unsupported => "unsupported",
            ErrorKind::Encoding => "encoding",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by a single command.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{kind} index {index} out of range (have {count})")]
    TrackOutOfRange {
        kind: TrackKind,
        index: i64,
        count: usize,
    },

    #[error("device index {index} out of range (have {count} devices)")]
    DeviceOutOfRange { index: i64, count: usize },

    #[error("{what} index {index} out of range (have {count})")]
    IndexOutOfRange {
        what: &'static str,
        index: i64,
        count: usize,
    },

    #[error("parameter '{name}' not found on device '{device}'")]
    ParameterNotFound { name: String, device: String },

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("device '{device}' is not a {required}")]
    MissingCapability {
        device: String,
        required: &'static str,
    },

    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("failed to encode response: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::TrackOutOfRange { .. }
            | CommandError::DeviceOutOfRange { .. }
            | CommandError::IndexOutOfRange { .. } => ErrorKind::Addressing,
            CommandError::ParameterNotFound { .. } | CommandError::NotFound(_) => {
                ErrorKind::NotFound
            }
            CommandError::Resolution(_) => ErrorKind::ValueResolution,
            CommandError::MissingCapability { .. } => ErrorKind::Capability,
            CommandError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            CommandError::Host(HostError::Unsupported(_)) => ErrorKind::Unsupported,
            CommandError::Host(_) => ErrorKind::InvalidArgument,
            CommandError::Encoding(_) => ErrorKind::Encoding,
        }
    }
}

/// Convenient Result alias for command operations.
pub type Result<T> = std::result::Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_option_lists_all_labels() {
        let err = ResolutionError::UnknownOption {
            target: "1/32".into(),
            parameter: "Rate".into(),
            options: vec!["1/4".into(), "1/8".into(), "1/16".into()],
        };
        assert_eq!(
            err.to_string(),
            "'1/32' not found in value_items for 'Rate'. Options: 1/4, 1/8, 1/16"
        );
    }

    #[test]
    fn no_match_reports_range() {
        let err = ResolutionError::NoMatch {
            target: "99 hz".into(),
            parameter: "Freq".into(),
            low: 0,
            high: 10,
        };
        assert_eq!(err.to_string(), "'99 hz' not matched for 'Freq' (range 0-10)");
    }

    #[test]
    fn kinds_follow_taxonomy() {
        let addressing = CommandError::TrackOutOfRange { kind: TrackKind::Return, index: 4, count: 2 };
        assert_eq!(addressing.kind(), ErrorKind::Addressing);
        assert_eq!(addressing.to_string(), "return index 4 out of range (have 2)");

        let resolution: CommandError = ResolutionError::NoMatch {
            target: "x".into(),
            parameter: "p".into(),
            low: 0,
            high: 1,
        }
        .into();
        assert_eq!(resolution.kind(), ErrorKind::ValueResolution);

        let unsupported: CommandError = HostError::Unsupported("copy_pad").into();
        assert_eq!(unsupported.kind(), ErrorKind::Unsupported);

        let capability = CommandError::MissingCapability { device: "EQ Eight".into(), required: "rack" };
        assert_eq!(capability.kind(), ErrorKind::Capability);
        assert_eq!(capability.to_string(), "device 'EQ Eight' is not a rack");
    }
}
