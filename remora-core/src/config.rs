use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::params::ResolveOptions;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    resolver: ResolverConfig,
    #[serde(default)]
    transport: TransportConfig,
    #[serde(default)]
    runtime: RuntimeConfig,
}

#[derive(Deserialize, Default)]
struct ResolverConfig {
    max_probe_span: Option<u64>,
    trace_probes: Option<bool>,
}

#[derive(Deserialize, Default)]
struct TransportConfig {
    stop_playback_with_recording: Option<bool>,
}

#[derive(Deserialize, Default)]
struct RuntimeConfig {
    log_level: Option<String>,
}

pub struct Config {
    resolver: ResolverConfig,
    transport: TransportConfig,
    runtime: RuntimeConfig,
}

impl Default for Config {
    /// Built-in defaults only, without reading the user file.
    fn default() -> Self {
        let base = embedded();
        Config { resolver: base.resolver, transport: base.transport, runtime: base.runtime }
    }
}

fn embedded() -> ConfigFile {
    toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!(target: "config", "embedded config.toml is invalid: {}", e);
        ConfigFile::default()
    })
}

impl Config {
    /// Embedded defaults overlaid with the user's config file, if any.
    pub fn load() -> Self {
        match user_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Embedded defaults overlaid with the file at `path`. A missing, unreadable
    /// or malformed file leaves the defaults in place.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Self::default();
        if !path.exists() {
            return config;
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                Ok(user) => config.merge(user),
                Err(e) => {
                    log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                }
            },
            Err(e) => {
                log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
            }
        }
        config
    }

    /// Embedded defaults overlaid with `contents`.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let user: ConfigFile = toml::from_str(contents)?;
        let mut config = Self::default();
        config.merge(user);
        Ok(config)
    }

    fn merge(&mut self, user: ConfigFile) {
        if user.resolver.max_probe_span.is_some() {
            self.resolver.max_probe_span = user.resolver.max_probe_span;
        }
        if user.resolver.trace_probes.is_some() {
            self.resolver.trace_probes = user.resolver.trace_probes;
        }
        if user.transport.stop_playback_with_recording.is_some() {
            self.transport.stop_playback_with_recording = user.transport.stop_playback_with_recording;
        }
        if user.runtime.log_level.is_some() {
            self.runtime.log_level = user.runtime.log_level;
        }
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            max_probe_span: self.resolver.max_probe_span,
            trace_probes: self.resolver.trace_probes.unwrap_or(false),
        }
    }

    /// Whether `stop_arrangement_recording` also stops playback when the command doesn't say.
    pub fn stop_playback_with_recording(&self) -> bool {
        self.transport.stop_playback_with_recording.unwrap_or(true)
    }

    /// Log level name for the CLI; unrecognized names fall back to "warn".
    pub fn log_level(&self) -> log::LevelFilter {
        self.runtime
            .log_level
            .as_deref()
            .and_then(parse_level)
            .unwrap_or(log::LevelFilter::Warn)
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("remora").join("config.toml"))
}

fn parse_level(s: &str) -> Option<log::LevelFilter> {
    match s.to_lowercase().as_str() {
        "off" => Some(log::LevelFilter::Off),
        "error" => Some(log::LevelFilter::Error),
        "warn" | "warning" => Some(log::LevelFilter::Warn),
        "info" => Some(log::LevelFilter::Info),
        "debug" => Some(log::LevelFilter::Debug),
        "trace" => Some(log::LevelFilter::Trace),
        _ => None,
    }
}
