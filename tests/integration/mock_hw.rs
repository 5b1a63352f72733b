//! Mock adapters for integration tests.
//!
//! `MockHardware` serves scripted sensor results from queues (the last
//! result repeats once a queue runs dry) and records every indicator call.
//! `RecordingRadio` and `VecSink` keep the full publication and event
//! history so tests can assert on it.

use std::collections::VecDeque;

use elevator_monitor::app::events::AppEvent;
use elevator_monitor::app::ports::{
    AccelerometerPort, BatteryPort, ClimatePort, ClockPort, EventSink, IndicatorPort, RadioPort,
};
use elevator_monitor::detect::AccelVector;
use elevator_monitor::error::SensorError;
use elevator_monitor::mode::Mode;
use elevator_monitor::tick::Tick;

// ── Scripted reading queue ────────────────────────────────────

pub struct Script<T: Copy> {
    queue: VecDeque<Result<T, SensorError>>,
    last: Result<T, SensorError>,
    pub reads: u32,
}

impl<T: Copy> Script<T> {
    pub fn constant(value: T) -> Self {
        Self {
            queue: VecDeque::new(),
            last: Ok(value),
            reads: 0,
        }
    }

    pub fn push(&mut self, result: Result<T, SensorError>) {
        self.queue.push_back(result);
    }

    pub fn next(&mut self) -> Result<T, SensorError> {
        self.reads += 1;
        if let Some(r) = self.queue.pop_front() {
            self.last = r;
        }
        self.last
    }
}

// ── Indicator call record ─────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorCall {
    SetMode(Mode),
    Pulse(u16),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub now: Tick,
    pub pressure: Script<f32>,
    pub altitude: Script<f32>,
    pub accel: Script<AccelVector>,
    pub battery: Script<f32>,
    pub indicator: Vec<IndicatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            now: Tick::ZERO,
            pressure: Script::constant(101_325.0),
            altitude: Script::constant(0.0),
            accel: Script::constant(AccelVector::new(0.0, 0.0, 1.0)),
            battery: Script::constant(3.7),
            indicator: Vec::new(),
        }
    }

    pub fn at(&mut self, ms: u64) -> &mut Self {
        self.now = Tick::from_millis(ms);
        self
    }

    pub fn pulses(&self) -> usize {
        self.indicator
            .iter()
            .filter(|c| matches!(c, IndicatorCall::Pulse(_)))
            .count()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for MockHardware {
    fn now(&self) -> Tick {
        self.now
    }
}

impl ClimatePort for MockHardware {
    fn read_pressure(&mut self) -> Result<f32, SensorError> {
        self.pressure.next()
    }

    fn read_altitude(&mut self) -> Result<f32, SensorError> {
        self.altitude.next()
    }
}

impl AccelerometerPort for MockHardware {
    fn read_vector(&mut self) -> Result<AccelVector, SensorError> {
        self.accel.next()
    }
}

impl BatteryPort for MockHardware {
    fn read_voltage(&mut self) -> Result<f32, SensorError> {
        self.battery.next()
    }
}

impl IndicatorPort for MockHardware {
    fn set_mode(&mut self, mode: Mode) {
        self.indicator.push(IndicatorCall::SetMode(mode));
    }

    fn pulse(&mut self, duration_ms: u16) {
        self.indicator.push(IndicatorCall::Pulse(duration_ms));
    }
}

// ── RecordingRadio ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Battery(f32),
    Barometer { channel: u8, pressure: f32, altitude: f32 },
    Pairing { name: String, version: String },
}

#[derive(Default)]
pub struct RecordingRadio {
    pub sent: Vec<Sent>,
}

#[allow(dead_code)]
impl RecordingRadio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn barometer_count(&self) -> usize {
        self.sent
            .iter()
            .filter(|s| matches!(s, Sent::Barometer { .. }))
            .count()
    }

    pub fn battery_count(&self) -> usize {
        self.sent.iter().filter(|s| matches!(s, Sent::Battery(_))).count()
    }
}

impl RadioPort for RecordingRadio {
    fn publish_battery(&mut self, voltage: f32) {
        self.sent.push(Sent::Battery(voltage));
    }

    fn publish_barometer(&mut self, channel: u8, pressure: f32, altitude: f32) {
        self.sent.push(Sent::Barometer {
            channel,
            pressure,
            altitude,
        });
    }

    fn pairing_request(&mut self, node_name: &str, firmware_version: &str) {
        self.sent.push(Sent::Pairing {
            name: node_name.to_string(),
            version: firmware_version.to_string(),
        });
    }
}

// ── VecSink ───────────────────────────────────────────────────

#[derive(Default)]
pub struct VecSink {
    pub events: Vec<AppEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for VecSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
