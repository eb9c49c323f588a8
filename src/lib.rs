// Device-agnostic input pipeline
//
// Converts heterogeneous physical input (keyboard, gamepad, touch) into
// a canonical stream of logical game commands, with configurable rules
// for suppressing or prioritizing conflicting simultaneous inputs.
//
// ## Architecture
//
// - `event`: raw event primitives and input codes
// - `binding`: actions and the physical-to-logical binding table
// - `config`: JSON binding document loading
// - `adapter`: poll-based device adapters and their push handles
// - `registry`: thread-safe adapter collection and event aggregation
// - `strategy`: individual conflict-resolution rules
// - `chain`: ordered strategy application (admission + batch passes)
// - `command`: command objects and generation from admitted events
// - `pipeline`: composition root driving one tick of the whole flow
//
// ## Usage Example
//
// ```rust
// use rebind::{
//     config, DeviceClass, DeviceRegistry, InputCode, InputPipeline, QueueAdapter,
//     ResolutionChain, Strategy,
// };
// use std::sync::Arc;
//
// let table = Arc::new(config::parse_bindings(
//     r#"{ "actions": { "Jump": {} },
//          "bindings": { "Keyboard": { "32": ["Jump"] } } }"#,
// )?);
//
// let registry = Arc::new(DeviceRegistry::new());
// let keyboard = QueueAdapter::keyboard();
// let keys = keyboard.pusher();
// registry.register(Box::new(keyboard));
//
// let mut chain = ResolutionChain::new();
// chain.push(Strategy::device_priority(DeviceClass::Keyboard, DeviceClass::Gamepad));
//
// let mut pipeline = InputPipeline::new(table, registry, chain);
//
// // Once per game-loop tick:
// keys.push_button(32, 1.0, 1);
// pipeline.tick(&mut |command| {
//     println!("execute {}", command.action().name());
// });
// # Ok::<(), anyhow::Error>(())
// ```

pub mod adapter;
pub mod binding;
pub mod chain;
pub mod command;
pub mod config;
pub mod event;
pub mod pipeline;
pub mod registry;
pub mod strategy;

// Re-export commonly used types
pub use adapter::{DeviceAdapter, EventPusher, QueueAdapter};
pub use binding::{Action, BindingTable, BindingTableBuilder};
pub use chain::ResolutionChain;
pub use command::Command;
pub use config::{load_bindings_file, ConfigError};
pub use event::{DeviceClass, EventKind, InputCode, RawEvent};
pub use pipeline::InputPipeline;
pub use registry::{AdapterId, DeviceRegistry};
pub use strategy::Strategy;
