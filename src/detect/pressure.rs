//! Pressure change detector with a keep-alive floor.
//!
//! Publishes a `(pressure, altitude)` pair when the pressure has moved by at
//! least the change threshold since the last publish, or when the keep-alive
//! interval has run out.  The keep-alive bounds how long the base station
//! can go without hearing from a live node.
//!
//! The altitude read happens only once a publish is decided; if it fails
//! the whole publish is abandoned and the gate is left untouched, so the
//! next barometer update retries naturally.

use crate::app::events::PublishTrigger;
use crate::app::ports::ClimatePort;
use crate::config::NodeConfig;
use crate::error::SensorError;
use crate::tick::Tick;

/// Last published pressure and the tick at which the keep-alive is due.
///
/// Only advanced at the moment of a publish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PublishGate {
    last_published_value: f32,
    next_allowed_publish_time: Tick,
}

impl Default for PublishGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PublishGate {
    /// Boot state: nothing published yet, keep-alive already due.
    pub const fn new() -> Self {
        Self {
            last_published_value: 0.0,
            next_allowed_publish_time: Tick::ZERO,
        }
    }

    /// A gate that looks as if `value` was published with the keep-alive
    /// next due at `next_allowed_publish_time`.
    pub const fn seeded(value: f32, next_allowed_publish_time: Tick) -> Self {
        Self {
            last_published_value: value,
            next_allowed_publish_time,
        }
    }

    pub fn last_published_value(&self) -> f32 {
        self.last_published_value
    }

    pub fn next_allowed_publish_time(&self) -> Tick {
        self.next_allowed_publish_time
    }

    /// Why `value` would be published at `now`, if at all.
    /// A qualifying change wins over a due keep-alive.
    pub fn trigger(&self, value: f32, now: Tick, threshold: f32) -> Option<PublishTrigger> {
        if (value - self.last_published_value).abs() >= threshold {
            Some(PublishTrigger::PressureChange)
        } else if now >= self.next_allowed_publish_time {
            Some(PublishTrigger::KeepAlive)
        } else {
            None
        }
    }

    fn commit(&mut self, value: f32, now: Tick, keepalive_ms: u32) {
        self.last_published_value = value;
        self.next_allowed_publish_time = now.add_millis(keepalive_ms);
    }
}

/// Result of one barometer update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressureOutcome {
    /// Publish this pair; the gate has already been advanced.
    Publish {
        trigger: PublishTrigger,
        pressure: f32,
        altitude: f32,
    },
    /// Below threshold and keep-alive not due.
    Unchanged,
    /// Pressure read failed.
    ReadFailed(SensorError),
    /// Publish decided but altitude unavailable; nothing published.
    AltitudeUnavailable(SensorError),
}

/// Change-detection-with-timeout rule for barometric pressure.
#[derive(Debug, Clone)]
pub struct PressureChangeDetector {
    gate: PublishGate,
    threshold_pa: f32,
    keepalive_ms: u32,
}

impl PressureChangeDetector {
    pub fn new(config: &NodeConfig) -> Self {
        Self::with_params(config.pressure_change_threshold_pa, config.pressure_keepalive_ms)
    }

    pub fn with_params(threshold_pa: f32, keepalive_ms: u32) -> Self {
        Self {
            gate: PublishGate::new(),
            threshold_pa,
            keepalive_ms,
        }
    }

    /// Replace the gate state (restoring a known publish point).
    #[must_use]
    pub fn with_gate(mut self, gate: PublishGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn gate(&self) -> &PublishGate {
        &self.gate
    }

    /// Evaluate one barometer update.
    pub fn on_update(&mut self, now: Tick, climate: &mut impl ClimatePort) -> PressureOutcome {
        let pressure = match climate.read_pressure() {
            Ok(p) if p.is_finite() => p,
            Ok(_) => return PressureOutcome::ReadFailed(SensorError::ReadFailed),
            Err(e) => return PressureOutcome::ReadFailed(e),
        };

        let Some(trigger) = self.gate.trigger(pressure, now, self.threshold_pa) else {
            return PressureOutcome::Unchanged;
        };

        let altitude = match climate.read_altitude() {
            Ok(a) => a,
            Err(e) => return PressureOutcome::AltitudeUnavailable(e),
        };

        self.gate.commit(pressure, now, self.keepalive_ms);

        PressureOutcome::Publish {
            trigger,
            pressure,
            altitude,
        }
    }
}
