//! Dispatch abstraction over where commands are executed.

use crate::Command;

/// Executes commands against a host and returns the serialized response.
///
/// The in-process implementation lives in `remora-core`; anything that can
/// carry a [`Command`] to a host and bring back its reply can implement this.
pub trait Dispatcher {
    type Error;

    fn dispatch(&mut self, command: &Command) -> Result<serde_json::Value, Self::Error>;
}
