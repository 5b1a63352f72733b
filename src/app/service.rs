//! Node service: the hexagonal core.
//!
//! [`NodeService`] owns the mode controller and every detector.  It is the
//! single dispatch point for [`NodeInput`]s: each input runs its handler to
//! completion (read → decide → publish → update state) before the next one
//! is looked at.  All I/O flows through port traits injected at call sites.
//!
//! ```text
//!  NodeHardware ──▶ ┌──────────────────────────────┐ ──▶ RadioPort
//!  (clock, sensors, │         NodeService          │
//!   indicator)   ◀──│ Mode · Pressure · Motion · Bat │ ──▶ EventSink
//!                   └──────────────────────────────┘
//! ```
//!
//! Gating: barometer and accelerometer updates are evaluated only while
//! measuring; battery updates are always relayed.

use log::{debug, info};

use crate::config::NodeConfig;
use crate::detect::{
    BatteryRelay, MotionOutcome, MotionSpikeDetector, PressureChangeDetector, PressureOutcome,
};
use crate::error::SensorError;
use crate::mode::{Mode, ModeController};
use crate::tick::Tick;

use super::events::{AppEvent, Publication, PublishTrigger, SensorSource};
use super::inputs::NodeInput;
use super::ports::{EventSink, IndicatorPort, NodeHardware, RadioPort};

// ───────────────────────────────────────────────────────────────
// Counters
// ───────────────────────────────────────────────────────────────

/// Publication counters since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub battery_published: u32,
    pub barometer_published: u32,
    /// Accepted spikes, including ones whose publish was skipped.
    pub motion_spikes: u32,
    /// Evaluations abandoned on a failed read.
    pub skipped: u32,
}

// ───────────────────────────────────────────────────────────────
// NodeService
// ───────────────────────────────────────────────────────────────

/// The node service orchestrates all domain logic.
pub struct NodeService {
    config: NodeConfig,
    mode: ModeController,
    pressure: PressureChangeDetector,
    motion: MotionSpikeDetector,
    battery: BatteryRelay,
    stats: NodeStats,
}

impl NodeService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch any port; call [`start`](Self::start) next.
    pub fn new(config: NodeConfig) -> Self {
        let pressure = PressureChangeDetector::new(&config);
        let motion = MotionSpikeDetector::new(&config);
        Self {
            config,
            mode: ModeController::new(),
            pressure,
            motion,
            battery: BatteryRelay::new(),
            stats: NodeStats::default(),
        }
    }

    /// Swap in a pre-built pressure detector (e.g. one with a restored gate).
    #[must_use]
    pub fn with_pressure_detector(mut self, detector: PressureChangeDetector) -> Self {
        self.pressure = detector;
        self
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the initial mode on the indicator and announce the node.
    pub fn start(
        &mut self,
        indicator: &mut impl IndicatorPort,
        radio: &mut impl RadioPort,
        sink: &mut impl EventSink,
    ) {
        self.mode.sync_indicator(indicator);
        radio.pairing_request(&self.config.node_name, env!("CARGO_PKG_VERSION"));
        sink.emit(&AppEvent::Started(self.mode.mode()));
        info!(
            "NodeService started: '{}' v{} in {:?}",
            self.config.node_name,
            env!("CARGO_PKG_VERSION"),
            self.mode.mode()
        );
    }

    // ── Dispatch ──────────────────────────────────────────────

    /// Run the handler for one input to completion.
    pub fn handle(
        &mut self,
        input: NodeInput,
        hw: &mut impl NodeHardware,
        radio: &mut impl RadioPort,
        sink: &mut impl EventSink,
    ) {
        match input {
            NodeInput::ButtonPress => self.on_button_press(hw, sink),
            NodeInput::BatteryUpdate => self.on_battery_update(hw, radio, sink),
            NodeInput::BarometerUpdate => {
                if self.mode.is_measuring() {
                    self.on_barometer_update(hw, radio, sink);
                } else {
                    debug!("Barometer update ignored while idle");
                }
            }
            NodeInput::AccelerometerUpdate => {
                if self.mode.is_measuring() {
                    self.on_accelerometer_update(hw, radio, sink);
                } else {
                    debug!("Accelerometer update ignored while idle");
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn is_measuring(&self) -> bool {
        self.mode.is_measuring()
    }

    /// Magnitude of the most recent successful accelerometer sample.
    pub fn last_magnitude(&self) -> f32 {
        self.motion.last_magnitude()
    }

    pub fn stats(&self) -> NodeStats {
        self.stats
    }

    pub fn pressure_detector(&self) -> &PressureChangeDetector {
        &self.pressure
    }

    pub fn motion_detector(&self) -> &MotionSpikeDetector {
        &self.motion
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    // ── Handlers ──────────────────────────────────────────────

    fn on_button_press(&mut self, hw: &mut impl NodeHardware, sink: &mut impl EventSink) {
        let from = self.mode.mode();
        let to = self.mode.toggle(hw);
        sink.emit(&AppEvent::ModeChanged { from, to });
    }

    fn on_battery_update(
        &mut self,
        hw: &mut impl NodeHardware,
        radio: &mut impl RadioPort,
        sink: &mut impl EventSink,
    ) {
        let now = hw.now();
        match self.battery.on_update(hw) {
            Ok(voltage) => {
                radio.publish_battery(voltage);
                self.stats.battery_published += 1;
                sink.emit(&AppEvent::Published {
                    at: now,
                    publication: Publication::Battery { voltage },
                });
            }
            Err(error) => self.skip(SensorSource::Battery, error, sink),
        }
    }

    fn on_barometer_update(
        &mut self,
        hw: &mut impl NodeHardware,
        radio: &mut impl RadioPort,
        sink: &mut impl EventSink,
    ) {
        let now = hw.now();
        match self.pressure.on_update(now, hw) {
            PressureOutcome::Publish {
                trigger,
                pressure,
                altitude,
            } => self.publish_barometer(now, trigger, pressure, altitude, radio, sink),
            PressureOutcome::Unchanged => {}
            PressureOutcome::ReadFailed(error) | PressureOutcome::AltitudeUnavailable(error) => {
                self.skip(SensorSource::Barometer, error, sink);
            }
        }
    }

    fn on_accelerometer_update(
        &mut self,
        hw: &mut impl NodeHardware,
        radio: &mut impl RadioPort,
        sink: &mut impl EventSink,
    ) {
        let now = hw.now();
        match self.motion.on_update(now, hw) {
            MotionOutcome::Spike { magnitude } => {
                self.stats.motion_spikes += 1;
                info!("Motion spike: {:.2} g at {}", magnitude, now);
                hw.pulse(self.config.motion_pulse_ms);

                // A spike publishes only a fresh pair; a failed read skips
                // the publish like the pressure path does.
                let pair = hw
                    .read_pressure()
                    .and_then(|pressure| hw.read_altitude().map(|altitude| (pressure, altitude)));
                match pair {
                    Ok((pressure, altitude)) => self.publish_barometer(
                        now,
                        PublishTrigger::MotionSpike,
                        pressure,
                        altitude,
                        radio,
                        sink,
                    ),
                    Err(error) => self.skip(SensorSource::Barometer, error, sink),
                }
            }
            MotionOutcome::Quiet { .. } | MotionOutcome::Refractory { .. } => {}
            MotionOutcome::ReadFailed(error) => {
                self.skip(SensorSource::Accelerometer, error, sink);
            }
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn publish_barometer(
        &mut self,
        now: Tick,
        trigger: PublishTrigger,
        pressure: f32,
        altitude: f32,
        radio: &mut impl RadioPort,
        sink: &mut impl EventSink,
    ) {
        radio.publish_barometer(self.config.barometer_channel, pressure, altitude);
        self.stats.barometer_published += 1;
        sink.emit(&AppEvent::Published {
            at: now,
            publication: Publication::Barometer {
                trigger,
                pressure,
                altitude,
            },
        });
    }

    fn skip(&mut self, source: SensorSource, error: SensorError, sink: &mut impl EventSink) {
        self.stats.skipped += 1;
        debug!("{} evaluation skipped: {}", source.name(), error);
        sink.emit(&AppEvent::Skipped { source, error });
    }
}
