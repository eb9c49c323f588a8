// Thread-safe collection of device adapters

use crate::adapter::DeviceAdapter;
use crate::event::{DeviceClass, RawEvent};
use log::debug;
use parking_lot::Mutex;

/// Identifies a registered adapter so it can be unregistered later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdapterId(u64);

struct RegistryEntry {
    id: AdapterId,
    adapter: Box<dyn DeviceAdapter>,
}

struct RegistryInner {
    entries: Vec<RegistryEntry>,
    next_id: u64,
    active_device: DeviceClass,
}

/// Owns all registered device adapters and aggregates their events
///
/// Registration, unregistration, enable toggles, and polling are all
/// mutually exclusive behind one lock, so a settings thread can mutate
/// the adapter set while the game loop polls. Enabling an adapter does
/// not retroactively synthesize events it missed while disabled.
pub struct DeviceRegistry {
    inner: Mutex<RegistryInner>,
}

impl DeviceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                entries: Vec::new(),
                next_id: 0,
                active_device: DeviceClass::Keyboard,
            }),
        }
    }

    /// Register an adapter; returns an id for later unregistration
    pub fn register(&self, adapter: Box<dyn DeviceAdapter>) -> AdapterId {
        let mut inner = self.inner.lock();
        let id = AdapterId(inner.next_id);
        inner.next_id += 1;
        debug!("Registered {} adapter as {:?}", adapter.device_class(), id);
        inner.entries.push(RegistryEntry { id, adapter });
        id
    }

    /// Remove an adapter; returns whether it was registered
    pub fn unregister(&self, id: AdapterId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.entries.len();
        inner.entries.retain(|entry| entry.id != id);
        inner.entries.len() != before
    }

    /// Poll every enabled adapter, concatenating events in registration order
    ///
    /// Disabled adapters are not polled at all.
    pub fn poll_all(&self) -> Vec<RawEvent> {
        let mut inner = self.inner.lock();
        let mut events = Vec::new();
        for entry in &mut inner.entries {
            if entry.adapter.is_enabled() {
                events.extend(entry.adapter.poll());
            }
        }
        events
    }

    /// Enable or disable every adapter of the given device class
    pub fn set_enabled(&self, class: DeviceClass, enabled: bool) {
        let mut inner = self.inner.lock();
        for entry in &mut inner.entries {
            if entry.adapter.device_class() == class {
                entry.adapter.set_enabled(enabled);
            }
        }
        debug!("{} adapters set enabled={}", class, enabled);
    }

    /// The active-device hint for consumers; not enforced internally
    pub fn active_device(&self) -> DeviceClass {
        self.inner.lock().active_device
    }

    /// Set the active-device hint
    pub fn set_active_device(&self, class: DeviceClass) {
        self.inner.lock().active_device = class;
    }

    /// Number of registered adapters
    pub fn adapter_count(&self) -> usize {
        self.inner.lock().entries.len()
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
