//! Barometric climate module.
//!
//! Holds the last pressure sample; altitude is derived on read with the
//! international barometric formula against standard sea-level pressure:
//!
//! ```text
//! h = 44330 · (1 − (p / 101325)^(1 / 5.255))
//! ```

use crate::error::SensorError;

use super::ReadingCache;

/// Standard atmosphere at sea level, Pa.
pub const SEA_LEVEL_PA: f32 = 101_325.0;

const ALTITUDE_SCALE_M: f32 = 44_330.0;
const ALTITUDE_EXPONENT: f32 = 1.0 / 5.255;

/// Altitude in metres for `pressure_pa`.
///
/// Fails with [`SensorError::DerivedValueUnavailable`] for pressures the
/// formula cannot use (non-positive or non-finite).
pub fn altitude_from_pressure(pressure_pa: f32) -> Result<f32, SensorError> {
    if !pressure_pa.is_finite() || pressure_pa <= 0.0 {
        return Err(SensorError::DerivedValueUnavailable);
    }
    let altitude = ALTITUDE_SCALE_M * (1.0 - (pressure_pa / SEA_LEVEL_PA).powf(ALTITUDE_EXPONENT));
    if altitude.is_finite() {
        Ok(altitude)
    } else {
        Err(SensorError::DerivedValueUnavailable)
    }
}

pub struct ClimateSensor {
    pressure: ReadingCache,
}

impl Default for ClimateSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl ClimateSensor {
    pub const fn new() -> Self {
        Self {
            pressure: ReadingCache::new(),
        }
    }

    /// Feed a pressure sample in pascal.
    pub fn store_pressure(&self, pressure_pa: f32) {
        self.pressure.store(pressure_pa);
    }

    pub fn mark_failed(&self) {
        self.pressure.mark_failed();
    }

    pub fn pressure(&self) -> Result<f32, SensorError> {
        self.pressure.read()
    }

    /// Altitude derived from the cached pressure.  A failed pressure read
    /// propagates as-is.
    pub fn altitude(&self) -> Result<f32, SensorError> {
        altitude_from_pressure(self.pressure.read()?)
    }
}
