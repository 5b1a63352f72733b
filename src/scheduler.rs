//! Sensor cadence scheduler.
//!
//! Each sensor delivers updates on a fixed cadence (accelerometer and
//! barometer every 100 ms, battery hourly).  The scheduler keeps one
//! periodic entry per source and notifies a [`SchedulerDelegate`] when an
//! entry comes due; the main loop implements the delegate to push the
//! matching [`NodeInput`](crate::app::inputs::NodeInput) into the event queue.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  ┌───────────┐   ┌───────────┐   ┌───────────┐         │
//! │  │ Accel     │   │ Barometer │   │ Battery   │         │
//! │  │ 100 ms    │   │ 100 ms    │   │ 60 min    │         │
//! │  └─────┬─────┘   └─────┬─────┘   └─────┬─────┘         │
//! │        ▼               ▼               ▼               │
//! │  ┌──────────────────────────────────────────────────┐  │
//! │  │            SchedulerDelegate                     │  │
//! │  │     (main loop pushes into Event Queue)          │  │
//! │  └──────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! If the loop polls late, an entry that missed several periods fires once
//! and re-aligns to `now + interval`; updates are never replayed in bursts.

use log::{debug, info};

use crate::app::events::SensorSource;
use crate::app::ports::SchedulerDelegate;
use crate::config::NodeConfig;
use crate::tick::Tick;

/// Internal bookkeeping for one periodic source.
#[derive(Debug, Clone, Copy)]
struct Cadence {
    source: SensorSource,
    interval_ms: u32,
    next_due: Tick,
}

/// Periodic sensor update engine.
pub struct SensorScheduler {
    entries: [Cadence; 3],
    enabled: bool,
}

impl SensorScheduler {
    /// Build the three cadences from config; the first fire of each is
    /// one interval after `start`.
    pub fn new(config: &NodeConfig, start: Tick) -> Self {
        let entry = |source, interval_ms: u32| Cadence {
            source,
            interval_ms,
            next_due: start.add_millis(interval_ms),
        };
        let entries = [
            entry(SensorSource::Accelerometer, config.accelerometer_interval_ms),
            entry(SensorSource::Barometer, config.barometer_interval_ms),
            entry(SensorSource::Battery, config.battery_interval_ms),
        ];
        for e in &entries {
            info!("Scheduler: {} every {} ms", e.source.name(), e.interval_ms);
        }
        Self {
            entries,
            enabled: true,
        }
    }

    /// Enable or disable all cadences.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Make `source` due at the next poll (used at boot to take an initial
    /// battery reading instead of waiting an hour).
    pub fn trigger_now(&mut self, source: SensorSource, now: Tick) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.source == source) {
            e.next_due = now;
        }
    }

    /// Fire every entry that is due at `now`.  Returns how many fired.
    pub fn poll(&mut self, now: Tick, delegate: &mut dyn SchedulerDelegate) -> usize {
        if !self.enabled {
            return 0;
        }

        let mut fired = 0;
        for entry in &mut self.entries {
            if now < entry.next_due {
                continue;
            }

            delegate.on_sensor_due(entry.source);
            fired += 1;

            let next = entry.next_due.add_millis(entry.interval_ms);
            entry.next_due = if next > now {
                next
            } else {
                debug!(
                    "Scheduler: {} late by {} ms, re-aligning",
                    entry.source.name(),
                    now.millis_since(entry.next_due)
                );
                now.add_millis(entry.interval_ms)
            };
        }
        fired
    }

    /// Earliest tick at which any entry comes due.
    pub fn next_deadline(&self) -> Tick {
        self.entries
            .iter()
            .map(|e| e.next_due)
            .min()
            .unwrap_or(Tick::ZERO)
    }
}
