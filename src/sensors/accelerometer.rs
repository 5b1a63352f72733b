//! 3-axis accelerometer cache.
//!
//! Each axis is its own [`ReadingCache`]; a sample is valid only if all
//! three axes are.  Components are clamped to ±full-scale, matching what
//! the device reports when it saturates.

use crate::detect::AccelVector;
use crate::error::SensorError;

use super::ReadingCache;

pub struct AccelerometerSensor {
    x: ReadingCache,
    y: ReadingCache,
    z: ReadingCache,
    full_scale_g: f32,
}

impl AccelerometerSensor {
    pub fn new(full_scale_g: u8) -> Self {
        Self {
            x: ReadingCache::new(),
            y: ReadingCache::new(),
            z: ReadingCache::new(),
            full_scale_g: f32::from(full_scale_g),
        }
    }

    /// Feed a sample in g.
    pub fn store(&self, sample: AccelVector) {
        let clamp = |v: f32| {
            if v.is_finite() {
                v.clamp(-self.full_scale_g, self.full_scale_g)
            } else {
                v
            }
        };
        self.x.store(clamp(sample.x));
        self.y.store(clamp(sample.y));
        self.z.store(clamp(sample.z));
    }

    pub fn mark_failed(&self) {
        self.x.mark_failed();
        self.y.mark_failed();
        self.z.mark_failed();
    }

    pub fn read(&self) -> Result<AccelVector, SensorError> {
        Ok(AccelVector::new(self.x.read()?, self.y.read()?, self.z.read()?))
    }
}
