//! Motion spike detector with a refractory period.
//!
//! Turns the 10 Hz accelerometer stream into sparse "something moved
//! sharply" events.  A spike is a magnitude strictly above the threshold;
//! once one is accepted the detector stays silent for the refractory
//! window, so a sustained vibration (a running elevator) yields at most one
//! event per window.
//!
//! The detector only decides.  Pulsing the indicator and publishing the
//! barometer pair that accompanies a spike is the service's job.

use crate::app::ports::AccelerometerPort;
use crate::config::NodeConfig;
use crate::error::SensorError;
use crate::tick::Tick;

/// One accelerometer sample, in g.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccelVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelVector {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Earliest tick at which the next spike may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefractoryTimer {
    next_allowed_fire: Tick,
}

impl RefractoryTimer {
    pub const fn new() -> Self {
        Self {
            next_allowed_fire: Tick::ZERO,
        }
    }

    pub fn is_ready(&self, now: Tick) -> bool {
        now >= self.next_allowed_fire
    }

    pub fn arm(&mut self, now: Tick, window_ms: u32) {
        self.next_allowed_fire = now.add_millis(window_ms);
    }

    pub fn next_allowed_fire(&self) -> Tick {
        self.next_allowed_fire
    }
}

/// Result of one accelerometer update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionOutcome {
    /// Read failed; the previous magnitude is kept and nothing is evaluated.
    ReadFailed(SensorError),
    /// At or below threshold.
    Quiet { magnitude: f32 },
    /// Above threshold but inside the refractory window.
    Refractory { magnitude: f32 },
    /// Accepted spike; the refractory timer has been armed.
    Spike { magnitude: f32 },
}

/// Threshold-with-refractory rule for acceleration magnitude.
#[derive(Debug, Clone)]
pub struct MotionSpikeDetector {
    timer: RefractoryTimer,
    last_magnitude: f32,
    threshold_g: f32,
    refractory_ms: u32,
}

impl MotionSpikeDetector {
    pub fn new(config: &NodeConfig) -> Self {
        Self::with_params(config.motion_spike_threshold_g, config.motion_refractory_ms)
    }

    pub fn with_params(threshold_g: f32, refractory_ms: u32) -> Self {
        Self {
            timer: RefractoryTimer::new(),
            last_magnitude: 0.0,
            threshold_g,
            refractory_ms,
        }
    }

    /// Magnitude of the most recent successful sample (0.0 before the first).
    pub fn last_magnitude(&self) -> f32 {
        self.last_magnitude
    }

    pub fn timer(&self) -> &RefractoryTimer {
        &self.timer
    }

    /// Evaluate one accelerometer update.
    pub fn on_update(&mut self, now: Tick, accel: &mut impl AccelerometerPort) -> MotionOutcome {
        let sample = match accel.read_vector() {
            Ok(v) => v,
            Err(e) => return MotionOutcome::ReadFailed(e),
        };

        let magnitude = sample.magnitude();
        self.last_magnitude = magnitude;

        if magnitude.is_nan() || magnitude <= self.threshold_g {
            return MotionOutcome::Quiet { magnitude };
        }
        if !self.timer.is_ready(now) {
            return MotionOutcome::Refractory { magnitude };
        }

        self.timer.arm(now, self.refractory_ms);
        MotionOutcome::Spike { magnitude }
    }
}
