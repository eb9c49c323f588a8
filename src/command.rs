// Executable command objects and their generation from admitted events

use crate::binding::{Action, BindingTable};
use crate::event::RawEvent;

/// A resolved game command: an action plus the raw event that caused it
///
/// Execution semantics belong to the dispatch sink; the pipeline only
/// guarantees the action and originating event arrive intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    action: Action,
    source: RawEvent,
}

impl Command {
    /// Create a command
    pub fn new(action: Action, source: RawEvent) -> Self {
        Self { action, source }
    }

    /// The action to perform
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// The raw event that triggered this command
    pub fn source(&self) -> &RawEvent {
        &self.source
    }
}

/// Generate commands for one admitted event
///
/// Pure function: one command per action bound to the event's input
/// code, in binding order. Unbound events yield an empty batch, never
/// an error.
pub fn generate(table: &BindingTable, event: &RawEvent) -> Vec<Command> {
    table
        .lookup(event.input_code())
        .iter()
        .map(|action| Command::new(action.clone(), *event))
        .collect()
}
