//! # remora-core
//!
//! Command layer of the remora control-surface plugin. Addresses devices on
//! the host's tracks, turns display strings back into raw parameter values,
//! and dispatches remote-control commands against a borrowed host song.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use remora_core::config::Config;
//! use remora_core::dispatch::dispatch_command;
//! use remora_core::host::memory::MemorySong;
//! use remora_types::Command;
//!
//! // 1. Load defaults plus the user's config file
//! let config = Config::load();
//!
//! // 2. Borrow the host's song (here an in-memory fixture)
//! let mut song = MemorySong::from_json(&fixture)?;
//!
//! // 3. Decode and dispatch; the response is a JSON value
//! let command: Command = serde_json::from_str(line)?;
//! let response = dispatch_command(&command, &mut song, &config)?;
//! ```
//!
//! ## Module Overview
//!
//! - [`params`]: addressing, name lookup, display-value resolution, clamped
//!   application and snapshots. The engine behind every device command.
//! - [`dispatch`]: `dispatch_command`, `LocalDispatcher`, and one submodule per
//!   command family (devices, racks, drum racks, session)
//! - [`host`]: traits for the host object model, plus [`host::memory`], an
//!   in-memory implementation loadable from JSON
//! - [`config`]: TOML configuration (embedded defaults + user overrides)
//! - [`error`]: `CommandError`, `ResolutionError`, `HostError` and `ErrorKind`

pub mod config;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod params;

pub use config::Config;
pub use dispatch::{dispatch_command, LocalDispatcher};
pub use error::{CommandError, ErrorKind};
