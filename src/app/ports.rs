//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ NodeService (domain)
//! ```
//!
//! Driven adapters (clock, sensor caches, indicator LED, radio, event
//! sinks) implement these traits.  The [`NodeService`](super::service::NodeService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every handler can be driven by mocks with an injected clock.
//!
//! Reads are fallible and return a typed [`SensorError`]; publishes and
//! indicator calls are fire-and-forget.

use crate::detect::motion::AccelVector;
use crate::error::SensorError;
use crate::mode::Mode;
use crate::tick::Tick;

use super::events::SensorSource;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic, non-decreasing millisecond clock.
pub trait ClockPort {
    fn now(&self) -> Tick;
}

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapters: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Barometer / climate module: last pressure and derived altitude.
pub trait ClimatePort {
    /// Last pressure reading in pascal.
    fn read_pressure(&mut self) -> Result<f32, SensorError>;

    /// Altitude in metres derived from the last pressure reading.
    /// May fail independently of [`read_pressure`](Self::read_pressure).
    fn read_altitude(&mut self) -> Result<f32, SensorError>;
}

/// 3-axis accelerometer.
pub trait AccelerometerPort {
    /// Last acceleration vector in g.
    fn read_vector(&mut self) -> Result<AccelVector, SensorError>;
}

/// Battery monitor.
pub trait BatteryPort {
    /// Last battery voltage in volts.
    fn read_voltage(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → LED)
// ───────────────────────────────────────────────────────────────

/// Visual feedback on the status LED.
pub trait IndicatorPort {
    /// Solid on for [`Mode::Measuring`], off for [`Mode::Idle`].
    fn set_mode(&mut self, mode: Mode);

    /// Brief non-blocking flash; the LED returns to its mode level afterwards.
    fn pulse(&mut self, duration_ms: u16);
}

/// Everything a sensor handler may touch on the hardware side.
///
/// Blanket-implemented, so any adapter satisfying all five ports is a
/// `NodeHardware`; passing one `&mut` avoids splitting borrows across ports.
pub trait NodeHardware:
    ClockPort + ClimatePort + AccelerometerPort + BatteryPort + IndicatorPort
{
}

impl<T> NodeHardware for T where
    T: ClockPort + ClimatePort + AccelerometerPort + BatteryPort + IndicatorPort
{
}

// ───────────────────────────────────────────────────────────────
// Radio port (driven adapter: domain → base station)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget radio publications.  No return status is consumed;
/// delivery is the transport's concern.
pub trait RadioPort {
    fn publish_battery(&mut self, voltage: f32);

    fn publish_barometer(&mut self, channel: u8, pressure: f32, altitude: f32);

    /// One-time announce at startup.
    fn pairing_request(&mut self, node_name: &str, firmware_version: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from event system)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the [`SensorScheduler`](crate::scheduler::SensorScheduler)
/// invokes when a sensor cadence comes due.
///
/// The main loop implements this by forwarding to
/// [`push_event`](crate::events::push_event); the scheduler itself knows
/// nothing about the queue.
pub trait SchedulerDelegate {
    fn on_sensor_due(&mut self, source: SensorSource);
}
