//! Sensor subsystem: last-reading caches and the aggregating [`SensorHub`].
//!
//! Platform drivers (or the host simulator) push fresh samples into the
//! caches; the [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter)
//! reads them back through the sensor port traits when the matching
//! update is dispatched.  Every cache is lock-free so it can be fed from a
//! driver callback while the main loop reads.

pub mod accelerometer;
pub mod battery;
pub mod climate;

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use crate::error::SensorError;
use accelerometer::AccelerometerSensor;
use battery::BatterySensor;
use climate::ClimateSensor;

const STATE_EMPTY: u8 = 0;
const STATE_VALID: u8 = 1;
const STATE_FAILED: u8 = 2;

/// Single `f32` slot with a validity flag.
///
/// The value is stored as raw bits in an `AtomicU32`; the state byte is
/// published with `Release` after the value so a reader that observes
/// `VALID` also observes the matching bits.
pub struct ReadingCache {
    bits: AtomicU32,
    state: AtomicU8,
}

impl Default for ReadingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingCache {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU32::new(0),
            state: AtomicU8::new(STATE_EMPTY),
        }
    }

    /// Record a fresh sample.  Non-finite values count as a failed read.
    pub fn store(&self, value: f32) {
        if !value.is_finite() {
            self.mark_failed();
            return;
        }
        self.bits.store(value.to_bits(), Ordering::Relaxed);
        self.state.store(STATE_VALID, Ordering::Release);
    }

    /// Record that the last sample attempt failed.
    pub fn mark_failed(&self) {
        self.state.store(STATE_FAILED, Ordering::Release);
    }

    pub fn read(&self) -> Result<f32, SensorError> {
        match self.state.load(Ordering::Acquire) {
            STATE_VALID => Ok(f32::from_bits(self.bits.load(Ordering::Relaxed))),
            STATE_FAILED => Err(SensorError::ReadFailed),
            _ => Err(SensorError::NotReady),
        }
    }
}

/// Aggregates all sensor caches.
pub struct SensorHub {
    pub climate: ClimateSensor,
    pub accelerometer: AccelerometerSensor,
    pub battery: BatterySensor,
}

impl SensorHub {
    pub fn new(accel_full_scale_g: u8) -> Self {
        Self {
            climate: ClimateSensor::new(),
            accelerometer: AccelerometerSensor::new(accel_full_scale_g),
            battery: BatterySensor::new(),
        }
    }
}
