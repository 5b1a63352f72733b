//! Hardware adapter: bridges the sensor caches, status LED and clock to
//! the domain port traits.
//!
//! Satisfies every port in [`NodeHardware`](crate::app::ports::NodeHardware),
//! so the service gets one `&mut` for a whole handler.  On non-espidf
//! targets the LED is a [`SimPin`](crate::drivers::status_led::SimPin) and
//! the caches are fed by the simulator.

use embedded_hal::digital::OutputPin;

use crate::app::ports::{AccelerometerPort, BatteryPort, ClimatePort, ClockPort, IndicatorPort};
use crate::detect::AccelVector;
use crate::drivers::status_led::StatusLed;
use crate::error::SensorError;
use crate::mode::Mode;
use crate::sensors::SensorHub;
use crate::tick::Tick;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<'a, P, C> {
    sensors: &'a SensorHub,
    led: StatusLed<P>,
    clock: C,
}

impl<'a, P: OutputPin, C: ClockPort> HardwareAdapter<'a, P, C> {
    pub fn new(sensors: &'a SensorHub, led: StatusLed<P>, clock: C) -> Self {
        Self {
            sensors,
            led,
            clock,
        }
    }

    /// End an expired LED pulse.  Call every main-loop pass.
    pub fn tick_indicator(&mut self) {
        let now = self.clock.now();
        self.led.tick(now);
    }

    pub fn sensors(&self) -> &'a SensorHub {
        self.sensors
    }

    pub fn led(&self) -> &StatusLed<P> {
        &self.led
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

// ── ClockPort implementation ──────────────────────────────────

impl<P, C: ClockPort> ClockPort for HardwareAdapter<'_, P, C> {
    fn now(&self) -> Tick {
        self.clock.now()
    }
}

// ── Sensor port implementations ───────────────────────────────

impl<P, C> ClimatePort for HardwareAdapter<'_, P, C> {
    fn read_pressure(&mut self) -> Result<f32, SensorError> {
        self.sensors.climate.pressure()
    }

    fn read_altitude(&mut self) -> Result<f32, SensorError> {
        self.sensors.climate.altitude()
    }
}

impl<P, C> AccelerometerPort for HardwareAdapter<'_, P, C> {
    fn read_vector(&mut self) -> Result<AccelVector, SensorError> {
        self.sensors.accelerometer.read()
    }
}

impl<P, C> BatteryPort for HardwareAdapter<'_, P, C> {
    fn read_voltage(&mut self) -> Result<f32, SensorError> {
        self.sensors.battery.read()
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<P: OutputPin, C: ClockPort> IndicatorPort for HardwareAdapter<'_, P, C> {
    fn set_mode(&mut self, mode: Mode) {
        self.led.set_mode(mode);
    }

    fn pulse(&mut self, duration_ms: u16) {
        let now = self.clock.now();
        self.led.pulse(now, duration_ms);
    }
}
