// Poll-based device adapters and the push handle native integrations feed

use crate::event::{DeviceClass, EventKind, RawEvent};
use log::trace;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// A poll-based source of raw events for one device class
///
/// Adapters are edge-triggered: `poll` returns the events observed
/// since the previous poll, and a held control does not repeat unless
/// the adapter itself models repeat. The registry classifies adapters
/// by the declared `device_class` tag, never by concrete type.
pub trait DeviceAdapter: Send {
    /// The device class this adapter produces events for
    fn device_class(&self) -> DeviceClass;

    /// Drain all events observed since the previous poll
    fn poll(&mut self) -> Vec<RawEvent>;

    /// Gate whether this adapter produces events
    fn set_enabled(&mut self, enabled: bool);

    /// Check whether this adapter is enabled
    fn is_enabled(&self) -> bool;
}

/// State shared between a [`QueueAdapter`] and its [`EventPusher`]s
#[derive(Debug)]
struct QueueInner {
    queue: VecDeque<RawEvent>,
    enabled: bool,
    last_timestamp: u64,
}

impl QueueInner {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            enabled: true,
            last_timestamp: 0,
        }
    }
}

/// Queue-backed device adapter
///
/// The native input integration keeps an [`EventPusher`] and feeds
/// events from its own callbacks; the pipeline polls the adapter once
/// per tick. Each adapter owns its queue; there is no shared global
/// state between adapters.
pub struct QueueAdapter {
    class: DeviceClass,
    inner: Arc<Mutex<QueueInner>>,
}

impl QueueAdapter {
    /// Create an adapter for the given device class
    pub fn new(class: DeviceClass) -> Self {
        Self {
            class,
            inner: Arc::new(Mutex::new(QueueInner::new())),
        }
    }

    /// Create a keyboard adapter
    pub fn keyboard() -> Self {
        Self::new(DeviceClass::Keyboard)
    }

    /// Create a gamepad adapter
    pub fn gamepad() -> Self {
        Self::new(DeviceClass::Gamepad)
    }

    /// Create a touch adapter
    pub fn touch() -> Self {
        Self::new(DeviceClass::Touch)
    }

    /// Create a push handle for the native integration
    pub fn pusher(&self) -> EventPusher {
        EventPusher {
            class: self.class,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl DeviceAdapter for QueueAdapter {
    fn device_class(&self) -> DeviceClass {
        self.class
    }

    fn poll(&mut self) -> Vec<RawEvent> {
        let mut inner = self.inner.lock();
        if !inner.enabled {
            return Vec::new();
        }
        inner.queue.drain(..).collect()
    }

    fn set_enabled(&mut self, enabled: bool) {
        let mut inner = self.inner.lock();
        if inner.enabled && !enabled {
            // Events queued before the disable must not replay on re-enable
            inner.queue.clear();
        }
        inner.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.inner.lock().enabled
    }
}

/// Cloneable handle a native input integration uses to feed events
///
/// Pushes to a disabled adapter are dropped. Timestamps are clamped so
/// the adapter's event stream stays monotonically non-decreasing.
#[derive(Clone)]
pub struct EventPusher {
    class: DeviceClass,
    inner: Arc<Mutex<QueueInner>>,
}

impl EventPusher {
    /// The device class events pushed through this handle carry
    pub fn device_class(&self) -> DeviceClass {
        self.class
    }

    /// Push a raw event
    pub fn push_event(&self, kind: EventKind, code: i32, value: f32, timestamp: u64) {
        let mut inner = self.inner.lock();
        if !inner.enabled {
            trace!(
                "Dropping {:?} event (code {}) pushed to disabled {} adapter",
                kind,
                code,
                self.class
            );
            return;
        }
        let timestamp = timestamp.max(inner.last_timestamp);
        inner.last_timestamp = timestamp;
        inner
            .queue
            .push_back(RawEvent::new(self.class, kind, code, value, timestamp));
    }

    /// Push a button event
    pub fn push_button(&self, code: i32, value: f32, timestamp: u64) {
        self.push_event(EventKind::Button, code, value, timestamp);
    }

    /// Push an axis event
    pub fn push_axis(&self, code: i32, value: f32, timestamp: u64) {
        self.push_event(EventKind::Axis, code, value, timestamp);
    }

    /// Push a touch-down event
    pub fn push_touch_down(&self, code: i32, timestamp: u64) {
        self.push_event(EventKind::TouchDown, code, 1.0, timestamp);
    }

    /// Push a touch-up event
    pub fn push_touch_up(&self, code: i32, timestamp: u64) {
        self.push_event(EventKind::TouchUp, code, 0.0, timestamp);
    }
}
