//! LocalDispatcher: Dispatcher implementation for in-process execution.

use serde_json::Value;

use remora_types::{Command, Dispatcher};

use crate::config::Config;
use crate::error::CommandError;
use crate::host::Song;

use super::dispatch_command;

/// Dispatcher that executes commands directly on a borrowed host song.
pub struct LocalDispatcher<'a> {
    pub song: &'a mut dyn Song,
    pub config: &'a Config,
}

impl<'a> LocalDispatcher<'a> {
    pub fn new(song: &'a mut dyn Song, config: &'a Config) -> Self {
        Self { song, config }
    }
}

impl<'a> Dispatcher for LocalDispatcher<'a> {
    type Error = CommandError;

    fn dispatch(&mut self, command: &Command) -> Result<Value, CommandError> {
        dispatch_command(command, self.song, self.config)
    }
}
