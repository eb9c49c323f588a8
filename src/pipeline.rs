// Pipeline composition root
//
// One tick runs the whole flow synchronously:
// poll -> observe/admit -> bind -> batch resolve -> dispatch.
// Nothing in the flow can fail; malformed or unbound items degrade to
// producing no commands for that item.

use crate::binding::BindingTable;
use crate::chain::ResolutionChain;
use crate::command::{self, Command};
use crate::registry::DeviceRegistry;
use log::trace;
use std::sync::Arc;

/// The input pipeline: turns polled raw events into dispatched commands
///
/// Explicitly constructed with its collaborators; there are no global
/// registries. The binding table is shared read-only and can be swapped
/// atomically between ticks. The registry is shared so other threads
/// can register or enable adapters while the pipeline ticks.
pub struct InputPipeline {
    bindings: Arc<BindingTable>,
    registry: Arc<DeviceRegistry>,
    chain: ResolutionChain,
}

impl InputPipeline {
    /// Create a pipeline from its collaborators
    pub fn new(
        bindings: Arc<BindingTable>,
        registry: Arc<DeviceRegistry>,
        chain: ResolutionChain,
    ) -> Self {
        Self {
            bindings,
            registry,
            chain,
        }
    }

    /// Run one tick, dispatching every resolved command to the sink
    ///
    /// Returns the number of dispatched commands. A tick always
    /// completes; an empty command set is a normal outcome.
    pub fn tick(&mut self, sink: &mut dyn FnMut(Command)) -> usize {
        let events = self.registry.poll_all();
        trace!("Tick polled {} raw events", events.len());

        let mut batch = Vec::new();
        for event in &events {
            if !self.chain.admit(event) {
                continue;
            }
            batch.extend(command::generate(&self.bindings, event));
        }

        self.chain.resolve(&mut batch);

        let dispatched = batch.len();
        for command in batch {
            sink(command);
        }
        dispatched
    }

    /// Run one tick and collect the resolved commands
    pub fn tick_collect(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        self.tick(&mut |command| commands.push(command));
        commands
    }

    /// Swap in a new binding table; takes effect from the next tick
    pub fn replace_bindings(&mut self, bindings: Arc<BindingTable>) {
        self.bindings = bindings;
    }

    /// The current binding table
    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// The shared device registry
    pub fn registry(&self) -> &Arc<DeviceRegistry> {
        &self.registry
    }

    /// Mutable access to the resolution chain
    pub fn chain_mut(&mut self) -> &mut ResolutionChain {
        &mut self.chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::QueueAdapter;
    use crate::event::{DeviceClass, InputCode};
    use crate::strategy::Strategy;

    fn jump_table() -> Arc<BindingTable> {
        let mut builder = BindingTable::builder();
        builder.define_action("Jump");
        builder.define_action("MoveForward");
        builder.bind(InputCode::new(DeviceClass::Keyboard, 32), "Jump");
        builder.bind(InputCode::new(DeviceClass::Touch, 1), "Jump");
        builder.bind(InputCode::new(DeviceClass::Keyboard, 87), "MoveForward");
        builder.bind(InputCode::new(DeviceClass::Gamepad, 13), "MoveForward");
        Arc::new(builder.build())
    }

    #[test]
    fn test_end_to_end_jump_from_keyboard_and_touch() {
        let registry = Arc::new(DeviceRegistry::new());
        let keyboard = QueueAdapter::keyboard();
        let touch = QueueAdapter::touch();
        let key_push = keyboard.pusher();
        let touch_push = touch.pusher();
        registry.register(Box::new(keyboard));
        registry.register(Box::new(touch));

        let mut pipeline =
            InputPipeline::new(jump_table(), Arc::clone(&registry), ResolutionChain::new());

        key_push.push_button(32, 1.0, 1);
        let commands = pipeline.tick_collect();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].action().name(), "Jump");
        assert_eq!(commands[0].source().device, DeviceClass::Keyboard);

        touch_push.push_touch_down(1, 2);
        let commands = pipeline.tick_collect();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].action().name(), "Jump");
        assert_eq!(commands[0].source().device, DeviceClass::Touch);
    }

    #[test]
    fn test_unbound_event_produces_no_commands() {
        let registry = Arc::new(DeviceRegistry::new());
        let keyboard = QueueAdapter::keyboard();
        let pusher = keyboard.pusher();
        registry.register(Box::new(keyboard));

        let mut pipeline = InputPipeline::new(jump_table(), registry, ResolutionChain::new());

        pusher.push_button(999, 1.0, 1);
        assert!(pipeline.tick_collect().is_empty());
    }

    #[test]
    fn test_device_priority_resolves_across_adapters() {
        let registry = Arc::new(DeviceRegistry::new());
        let keyboard = QueueAdapter::keyboard();
        let gamepad = QueueAdapter::gamepad();
        let key_push = keyboard.pusher();
        let pad_push = gamepad.pusher();
        registry.register(Box::new(keyboard));
        registry.register(Box::new(gamepad));

        let chain = ResolutionChain::with_strategies(vec![Strategy::device_priority(
            DeviceClass::Keyboard,
            DeviceClass::Gamepad,
        )]);
        let mut pipeline = InputPipeline::new(jump_table(), registry, chain);

        pad_push.push_button(13, 1.0, 1);
        key_push.push_button(87, 1.0, 2);

        let commands = pipeline.tick_collect();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].action().name(), "MoveForward");
        assert_eq!(commands[0].source().device, DeviceClass::Keyboard);
    }

    #[test]
    fn test_exclusive_mode_blocks_events_across_ticks() {
        let registry = Arc::new(DeviceRegistry::new());
        let touch = QueueAdapter::touch();
        let gamepad = QueueAdapter::gamepad();
        let touch_push = touch.pusher();
        let pad_push = gamepad.pusher();
        registry.register(Box::new(touch));
        registry.register(Box::new(gamepad));

        let mut builder = BindingTable::builder();
        builder.define_action("MoveForward");
        builder.bind(InputCode::new(DeviceClass::Gamepad, 1001), "MoveForward");
        let table = Arc::new(builder.build());

        let chain = ResolutionChain::with_strategies(vec![Strategy::exclusive_mode(
            InputCode::new(DeviceClass::Touch, 1),
            InputCode::new(DeviceClass::Touch, 0),
            DeviceClass::Gamepad,
            1001..=1002,
        )]);
        let mut pipeline = InputPipeline::new(table, registry, chain);

        // The latch persists across ticks: enter on one tick, the pad
        // event on a later tick is still blocked.
        touch_push.push_touch_down(1, 1);
        pipeline.tick_collect();

        pad_push.push_button(1001, 1.0, 2);
        assert!(pipeline.tick_collect().is_empty());

        touch_push.push_touch_up(0, 3);
        pipeline.tick_collect();

        pad_push.push_button(1001, 1.0, 4);
        let commands = pipeline.tick_collect();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].action().name(), "MoveForward");
    }

    #[test]
    fn test_disabled_device_yields_nothing_for_the_tick() {
        let registry = Arc::new(DeviceRegistry::new());
        let keyboard = QueueAdapter::keyboard();
        let pusher = keyboard.pusher();
        registry.register(Box::new(keyboard));

        let mut pipeline =
            InputPipeline::new(jump_table(), Arc::clone(&registry), ResolutionChain::new());

        pusher.push_button(32, 1.0, 1);
        registry.set_enabled(DeviceClass::Keyboard, false);
        assert!(pipeline.tick_collect().is_empty());
    }

    #[test]
    fn test_replace_bindings_takes_effect_next_tick() {
        let registry = Arc::new(DeviceRegistry::new());
        let keyboard = QueueAdapter::keyboard();
        let pusher = keyboard.pusher();
        registry.register(Box::new(keyboard));

        let mut pipeline = InputPipeline::new(
            Arc::new(BindingTable::builder().build()),
            registry,
            ResolutionChain::new(),
        );

        pusher.push_button(32, 1.0, 1);
        assert!(pipeline.tick_collect().is_empty());

        pipeline.replace_bindings(jump_table());
        pusher.push_button(32, 1.0, 2);
        let commands = pipeline.tick_collect();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].action().name(), "Jump");
    }

    #[test]
    fn test_tick_reports_dispatch_count() {
        let registry = Arc::new(DeviceRegistry::new());
        let keyboard = QueueAdapter::keyboard();
        let pusher = keyboard.pusher();
        registry.register(Box::new(keyboard));

        let mut pipeline = InputPipeline::new(jump_table(), registry, ResolutionChain::new());

        pusher.push_button(32, 1.0, 1);
        pusher.push_button(87, 1.0, 2);

        let mut seen = Vec::new();
        let dispatched = pipeline.tick(&mut |command| seen.push(command));
        assert_eq!(dispatched, 2);
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_tick_on_idle_registry_is_empty_not_an_error() {
        let mut pipeline = InputPipeline::new(
            jump_table(),
            Arc::new(DeviceRegistry::new()),
            ResolutionChain::new(),
        );
        assert!(pipeline.tick_collect().is_empty());
    }
}
