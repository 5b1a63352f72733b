//! Inbound notifications to the node service.
//!
//! The platform (button ISR, sensor cadence timers) raises these; the event
//! loop hands each one to [`NodeService::handle`](super::service::NodeService::handle),
//! which runs the matching handler to completion.

use super::events::SensorSource;

/// Every event the core reacts to.
///
/// The discriminants double as the wire code in the ISR event queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeInput {
    /// Debounced button press.
    ButtonPress = 0,
    /// Accelerometer produced a new sample.
    AccelerometerUpdate = 10,
    /// Barometer produced a new sample.
    BarometerUpdate = 11,
    /// Battery monitor produced a new sample.
    BatteryUpdate = 12,
}

impl NodeInput {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::ButtonPress),
            10 => Some(Self::AccelerometerUpdate),
            11 => Some(Self::BarometerUpdate),
            12 => Some(Self::BatteryUpdate),
            _ => None,
        }
    }
}

impl From<SensorSource> for NodeInput {
    fn from(source: SensorSource) -> Self {
        match source {
            SensorSource::Accelerometer => Self::AccelerometerUpdate,
            SensorSource::Barometer => Self::BarometerUpdate,
            SensorSource::Battery => Self::BatteryUpdate,
        }
    }
}
