//! Battery voltage monitor.
//!
//! The cell is measured through a 1:2 resistive divider on an ADC1
//! channel.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: [`BatterySensor::sample`] reads the ADC via hw_init.
//! On host/test: the simulator calls [`BatterySensor::store`] directly.

use crate::error::SensorError;

use super::ReadingCache;

/// Divider ratio between the cell and the ADC pin.
const DIVIDER_RATIO: f32 = 2.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;

/// Cell voltage for a raw 12-bit ADC count.
pub fn adc_to_volts(raw: u16) -> f32 {
    f32::from(raw) / ADC_MAX * V_REF * DIVIDER_RATIO
}

pub struct BatterySensor {
    voltage: ReadingCache,
}

impl Default for BatterySensor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatterySensor {
    pub const fn new() -> Self {
        Self {
            voltage: ReadingCache::new(),
        }
    }

    pub fn store(&self, volts: f32) {
        self.voltage.store(volts);
    }

    pub fn mark_failed(&self) {
        self.voltage.mark_failed();
    }

    pub fn read(&self) -> Result<f32, SensorError> {
        self.voltage.read()
    }

    /// Take a fresh ADC sample into the cache.
    #[cfg(target_os = "espidf")]
    pub fn sample(&self) {
        use crate::drivers::hw_init;
        match hw_init::adc1_read(hw_init::ADC1_CH_BATTERY) {
            Some(raw) => self.store(adc_to_volts(raw)),
            None => self.mark_failed(),
        }
    }
}
