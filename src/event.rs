// Raw event primitives shared by the whole pipeline

use std::fmt;
use std::str::FromStr;

/// Physical device families the pipeline can receive events from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceClass {
    Keyboard,
    Gamepad,
    Touch,
}

impl DeviceClass {
    /// The token used for this class in binding documents
    pub fn token(&self) -> &'static str {
        match self {
            DeviceClass::Keyboard => "Keyboard",
            DeviceClass::Gamepad => "Gamepad",
            DeviceClass::Touch => "Touch",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Error for device-class tokens that don't name a known class
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown device class: {0}")]
pub struct UnknownDeviceClass(pub String);

impl FromStr for DeviceClass {
    type Err = UnknownDeviceClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Keyboard" => Ok(DeviceClass::Keyboard),
            "Gamepad" => Ok(DeviceClass::Gamepad),
            "Touch" => Ok(DeviceClass::Touch),
            other => Err(UnknownDeviceClass(other.to_string())),
        }
    }
}

/// What kind of physical interaction a raw event represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Button,
    Axis,
    TouchDown,
    TouchUp,
}

/// Identifies one physical control: a device class plus its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputCode {
    pub device: DeviceClass,
    pub code: i32,
}

impl InputCode {
    /// Create an input code
    pub fn new(device: DeviceClass, code: i32) -> Self {
        Self { device, code }
    }
}

/// One raw input event as observed by a device adapter
///
/// Immutable once produced. Timestamps are monotonic per adapter; the
/// adapter clamps them at push time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawEvent {
    pub device: DeviceClass,
    pub kind: EventKind,
    pub code: i32,
    pub value: f32,
    pub timestamp: u64,
}

impl RawEvent {
    /// Create a raw event
    pub fn new(device: DeviceClass, kind: EventKind, code: i32, value: f32, timestamp: u64) -> Self {
        Self {
            device,
            kind,
            code,
            value,
            timestamp,
        }
    }

    /// The input code this event belongs to, for binding lookups
    pub fn input_code(&self) -> InputCode {
        InputCode::new(self.device, self.code)
    }
}
