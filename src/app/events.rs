//! Outbound application events.
//!
//! The [`NodeService`](super::service::NodeService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  They describe what the core
//! decided; the radio publications themselves go through
//! [`RadioPort`](super::ports::RadioPort).

use crate::error::SensorError;
use crate::mode::Mode;
use crate::tick::Tick;

/// Which periodic sensor source an update came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorSource {
    Accelerometer,
    Barometer,
    Battery,
}

impl SensorSource {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Accelerometer => "accel",
            Self::Barometer => "baro",
            Self::Battery => "battery",
        }
    }
}

/// Why a barometer pair was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishTrigger {
    /// Pressure moved by at least the change threshold.
    PressureChange,
    /// Keep-alive floor reached without a qualifying change.
    KeepAlive,
    /// Acceleration spike outside the refractory window.
    MotionSpike,
}

/// A publication handed to the radio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Publication {
    Battery {
        voltage: f32,
    },
    Barometer {
        trigger: PublishTrigger,
        pressure: f32,
        altitude: f32,
    },
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries initial mode).
    Started(Mode),

    /// The button toggled the mode.
    ModeChanged { from: Mode, to: Mode },

    /// A publication was sent.
    Published { at: Tick, publication: Publication },

    /// An evaluation was abandoned because a read failed.
    Skipped { source: SensorSource, error: SensorError },
}
