// Conflict resolution strategies
//
// Each strategy is one rule for deciding which simultaneous inputs
// survive. The set is closed, so strategies are tagged variants rather
// than trait objects: resolution stays exhaustively matchable and each
// variant carries its own runtime state.

use crate::binding::Action;
use crate::command::Command;
use crate::event::{DeviceClass, InputCode, RawEvent};
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

/// A single conflict-resolution rule
///
/// Strategies participate in two passes: event admission (can this raw
/// event enter the pipeline at all) and batch resolution (rewrite the
/// generated command batch). A strategy that only cares about one pass
/// is a no-op in the other.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Prefer one device class over another per action
    ///
    /// Batch pass: when the preferred class produced a command for an
    /// action, every command for that action from the less-preferred
    /// class is removed.
    DevicePriority {
        preferred: DeviceClass,
        less_preferred: DeviceClass,
    },

    /// Latch-based exclusive input mode
    ///
    /// Event pass: the `enter` code latches, the `exit` code unlatches.
    /// While latched, events from the blocked class whose code falls in
    /// the blocked range are rejected; everything else passes through.
    ExclusiveMode {
        enter: InputCode,
        exit: InputCode,
        blocked: DeviceClass,
        blocked_codes: RangeInclusive<i32>,
        latched: bool,
    },

    /// Keep only the most recent command per action
    ///
    /// Batch pass: when several commands carry the same action, only
    /// the one with the greatest source timestamp survives (the first
    /// such command on ties). Relative batch order is preserved.
    LatestWins,
}

impl Strategy {
    /// Device-priority arbitration between two device classes
    pub fn device_priority(preferred: DeviceClass, less_preferred: DeviceClass) -> Self {
        Strategy::DevicePriority {
            preferred,
            less_preferred,
        }
    }

    /// Exclusive-mode arbitration; starts unlatched
    pub fn exclusive_mode(
        enter: InputCode,
        exit: InputCode,
        blocked: DeviceClass,
        blocked_codes: RangeInclusive<i32>,
    ) -> Self {
        Strategy::ExclusiveMode {
            enter,
            exit,
            blocked,
            blocked_codes,
            latched: false,
        }
    }

    /// Last-input-wins arbitration by source timestamp
    pub fn latest_wins() -> Self {
        Strategy::LatestWins
    }

    /// Strategy name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::DevicePriority { .. } => "DevicePriority",
            Strategy::ExclusiveMode { .. } => "ExclusiveMode",
            Strategy::LatestWins => "LatestWins",
        }
    }

    /// Update internal state from an event
    ///
    /// The chain runs this for every strategy on every event before any
    /// admission verdict, so a rejection by an earlier strategy cannot
    /// starve a later strategy's state.
    pub(crate) fn observe(&mut self, event: &RawEvent) {
        if let Strategy::ExclusiveMode {
            enter,
            exit,
            latched,
            ..
        } = self
        {
            let code = event.input_code();
            if code == *enter {
                *latched = true;
            } else if code == *exit {
                *latched = false;
            }
        }
    }

    /// Event-admission verdict
    pub(crate) fn admits(&self, event: &RawEvent) -> bool {
        match self {
            Strategy::ExclusiveMode {
                blocked,
                blocked_codes,
                latched,
                ..
            } => !(*latched && event.device == *blocked && blocked_codes.contains(&event.code)),
            _ => true,
        }
    }

    /// Batch-resolution pass
    pub(crate) fn resolve(&mut self, batch: &mut Vec<Command>) {
        match self {
            Strategy::DevicePriority {
                preferred,
                less_preferred,
            } => {
                let preferred_actions: HashSet<Action> = batch
                    .iter()
                    .filter(|command| command.source().device == *preferred)
                    .map(|command| command.action().clone())
                    .collect();

                batch.retain(|command| {
                    !(command.source().device == *less_preferred
                        && preferred_actions.contains(command.action()))
                });
            }
            Strategy::LatestWins => {
                let mut newest: HashMap<Action, u64> = HashMap::new();
                for command in batch.iter() {
                    let entry = newest
                        .entry(command.action().clone())
                        .or_insert(command.source().timestamp);
                    if command.source().timestamp > *entry {
                        *entry = command.source().timestamp;
                    }
                }

                let mut kept: HashSet<Action> = HashSet::new();
                batch.retain(|command| {
                    let is_newest = newest
                        .get(command.action())
                        .is_some_and(|ts| command.source().timestamp == *ts);
                    is_newest && kept.insert(command.action().clone())
                });
            }
            Strategy::ExclusiveMode { .. } => {}
        }
    }
}
