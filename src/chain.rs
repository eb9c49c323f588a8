// Ordered application of conflict resolution strategies

use crate::command::Command;
use crate::event::RawEvent;
use crate::strategy::Strategy;
use log::trace;

/// An ordered chain of conflict-resolution strategies
///
/// The chain owns its strategies and guarantees they run in
/// registration order in both passes. Ordering is load-bearing: each
/// batch strategy rewrites the batch the previous one produced, and the
/// first admission rejection is authoritative.
#[derive(Debug, Default)]
pub struct ResolutionChain {
    strategies: Vec<Strategy>,
}

impl ResolutionChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain from strategies in registration order
    pub fn with_strategies(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }

    /// Append a strategy; it runs after everything already registered
    pub fn push(&mut self, strategy: Strategy) {
        self.strategies.push(strategy);
    }

    /// Number of registered strategies
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check whether the chain has no strategies
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// The registered strategies, in order
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Decide whether a raw event survives admission
    ///
    /// Every strategy observes the event first, so internal state (the
    /// exclusive-mode latch) stays correct even when an earlier
    /// strategy rejects the event. Only the admission verdict itself
    /// short-circuits on the first rejection.
    pub fn admit(&mut self, event: &RawEvent) -> bool {
        for strategy in &mut self.strategies {
            strategy.observe(event);
        }

        for strategy in &self.strategies {
            if !strategy.admits(event) {
                trace!("{} rejected event {:?}", strategy.name(), event);
                return false;
            }
        }
        true
    }

    /// Run every strategy's batch pass over the command batch, in order
    pub fn resolve(&mut self, batch: &mut Vec<Command>) {
        for strategy in &mut self.strategies {
            strategy.resolve(batch);
        }
    }
}
