//! Integration tests for NodeService dispatch against mock adapters.
//!
//! Covers the reference scenarios for the pressure, motion, battery and
//! mode paths plus the failure paths around them.

use crate::mock_hw::{IndicatorCall, MockHardware, RecordingRadio, Sent, VecSink};

use elevator_monitor::app::events::{AppEvent, Publication, PublishTrigger, SensorSource};
use elevator_monitor::app::inputs::NodeInput;
use elevator_monitor::app::service::NodeService;
use elevator_monitor::config::NodeConfig;
use elevator_monitor::detect::{AccelVector, PressureChangeDetector, PublishGate};
use elevator_monitor::error::SensorError;
use elevator_monitor::mode::Mode;
use elevator_monitor::tick::Tick;

const KEEPALIVE_MS: u64 = 15 * 60 * 1000;

fn started() -> (NodeService, MockHardware, RecordingRadio, VecSink) {
    let mut svc = NodeService::new(NodeConfig::default());
    let mut hw = MockHardware::new();
    let mut radio = RecordingRadio::new();
    let mut sink = VecSink::new();
    svc.start(&mut hw, &mut radio, &mut sink);
    radio.sent.clear();
    sink.events.clear();
    hw.indicator.clear();
    (svc, hw, radio, sink)
}

/// Service whose gate looks like 101325 Pa was just published at t=0.
fn started_with_gate_at_sea_level() -> (NodeService, MockHardware, RecordingRadio, VecSink) {
    let (svc, hw, radio, sink) = started();
    let config = svc.config().clone();
    let det = PressureChangeDetector::new(&config)
        .with_gate(PublishGate::seeded(101_325.0, Tick::from_millis(KEEPALIVE_MS)));
    (svc.with_pressure_detector(det), hw, radio, sink)
}

fn accel_g(m: f32) -> AccelVector {
    AccelVector::new(0.0, 0.0, m)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_pairs_and_shows_measuring() {
    let mut svc = NodeService::new(NodeConfig::default());
    let (mut hw, mut radio, mut sink) = (MockHardware::new(), RecordingRadio::new(), VecSink::new());
    svc.start(&mut hw, &mut radio, &mut sink);

    assert_eq!(
        radio.sent,
        vec![Sent::Pairing {
            name: "elevator-monitor".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }]
    );
    assert_eq!(hw.indicator, vec![IndicatorCall::SetMode(Mode::Measuring)]);
    assert_eq!(sink.events, vec![AppEvent::Started(Mode::Measuring)]);
    assert!(svc.is_measuring());
}

// ── Scenario A: pressure change ───────────────────────────────

#[test]
fn pressure_publishes_on_third_reading_only() {
    let (mut svc, mut hw, mut radio, mut sink) = started_with_gate_at_sea_level();
    hw.altitude.push(Ok(-0.33));

    for (ms, p) in [(0, 101_325.0), (50, 101_325.0), (100, 101_329.0)] {
        hw.pressure.push(Ok(p));
        hw.at(ms);
        svc.handle(NodeInput::BarometerUpdate, &mut hw, &mut radio, &mut sink);
    }

    assert_eq!(
        radio.sent,
        vec![Sent::Barometer {
            channel: 0,
            pressure: 101_329.0,
            altitude: -0.33
        }]
    );
    assert_eq!(hw.altitude.reads, 1, "altitude read only once a publish is decided");
    assert_eq!(
        sink.events,
        vec![AppEvent::Published {
            at: Tick::from_millis(100),
            publication: Publication::Barometer {
                trigger: PublishTrigger::PressureChange,
                pressure: 101_329.0,
                altitude: -0.33,
            },
        }]
    );

    let gate = svc.pressure_detector().gate();
    assert_eq!(gate.last_published_value(), 101_329.0);
    assert_eq!(gate.next_allowed_publish_time(), Tick::from_millis(100 + KEEPALIVE_MS));
}

#[test]
fn small_drift_is_held_until_keepalive() {
    let (mut svc, mut hw, mut radio, mut sink) = started_with_gate_at_sea_level();
    hw.pressure = crate::mock_hw::Script::constant(101_326.5);

    hw.at(KEEPALIVE_MS - 1);
    svc.handle(NodeInput::BarometerUpdate, &mut hw, &mut radio, &mut sink);
    assert!(radio.sent.is_empty());

    hw.at(KEEPALIVE_MS);
    svc.handle(NodeInput::BarometerUpdate, &mut hw, &mut radio, &mut sink);
    assert_eq!(radio.barometer_count(), 1);
    assert!(matches!(
        sink.events[0],
        AppEvent::Published {
            publication: Publication::Barometer {
                trigger: PublishTrigger::KeepAlive,
                ..
            },
            ..
        }
    ));
}

#[test]
fn altitude_failure_aborts_publish_and_keeps_gate() {
    let (mut svc, mut hw, mut radio, mut sink) = started_with_gate_at_sea_level();
    hw.pressure.push(Ok(101_400.0));
    hw.altitude.push(Err(SensorError::DerivedValueUnavailable));
    hw.at(200);
    svc.handle(NodeInput::BarometerUpdate, &mut hw, &mut radio, &mut sink);

    assert!(radio.sent.is_empty());
    assert_eq!(svc.pressure_detector().gate().last_published_value(), 101_325.0);
    assert_eq!(
        sink.events,
        vec![AppEvent::Skipped {
            source: SensorSource::Barometer,
            error: SensorError::DerivedValueUnavailable
        }]
    );

    // Next update retries with a working altitude.
    hw.altitude.push(Ok(-6.0));
    hw.at(300);
    svc.handle(NodeInput::BarometerUpdate, &mut hw, &mut radio, &mut sink);
    assert_eq!(radio.barometer_count(), 1);
}

#[test]
fn pressure_read_failure_is_skipped() {
    let (mut svc, mut hw, mut radio, mut sink) = started();
    hw.pressure.push(Err(SensorError::ReadFailed));
    svc.handle(NodeInput::BarometerUpdate, &mut hw, &mut radio, &mut sink);

    assert!(radio.sent.is_empty());
    assert_eq!(hw.altitude.reads, 0);
    assert_eq!(svc.stats().skipped, 1);
}

// ── Scenario B: motion spike with refractory window ───────────

#[test]
fn spike_publishes_once_per_refractory_window() {
    let (mut svc, mut hw, mut radio, mut sink) = started();

    for (ms, g) in [(0, 1.0), (100, 1.0), (200, 5.0), (300, 5.0), (400, 5.0)] {
        hw.accel.push(Ok(accel_g(g)));
        hw.at(ms);
        svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);
    }

    assert_eq!(radio.barometer_count(), 1);
    assert_eq!(hw.pulses(), 1);
    assert_eq!(svc.stats().motion_spikes, 1);
    assert_eq!(
        svc.motion_detector().timer().next_allowed_fire(),
        Tick::from_millis(1_700)
    );
    assert!(matches!(
        sink.events[0],
        AppEvent::Published {
            at,
            publication: Publication::Barometer {
                trigger: PublishTrigger::MotionSpike,
                ..
            },
        } if at == Tick::from_millis(200)
    ));

    hw.at(1_699);
    svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);
    assert_eq!(radio.barometer_count(), 1);

    hw.at(1_700);
    svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);
    assert_eq!(radio.barometer_count(), 2);
}

#[test]
fn threshold_magnitude_is_not_a_spike() {
    let (mut svc, mut hw, mut radio, mut sink) = started();
    hw.accel.push(Ok(accel_g(4.0)));
    svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);
    assert!(radio.sent.is_empty());
    assert_eq!(svc.last_magnitude(), 4.0);
}

#[test]
fn spike_with_failed_pressure_pulses_but_does_not_publish() {
    let (mut svc, mut hw, mut radio, mut sink) = started();
    hw.accel.push(Ok(accel_g(6.0)));
    hw.pressure.push(Err(SensorError::ReadFailed));
    hw.at(500);
    svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);

    assert!(radio.sent.is_empty());
    assert_eq!(hw.pulses(), 1);
    assert_eq!(
        svc.motion_detector().timer().next_allowed_fire(),
        Tick::from_millis(2_000)
    );
    assert_eq!(svc.stats().skipped, 1);
}

#[test]
fn spike_publish_leaves_pressure_gate_alone() {
    let (mut svc, mut hw, mut radio, mut sink) = started_with_gate_at_sea_level();
    hw.accel.push(Ok(accel_g(5.0)));
    hw.pressure.push(Ok(101_200.0));
    svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);

    assert_eq!(radio.barometer_count(), 1);
    assert_eq!(svc.pressure_detector().gate().last_published_value(), 101_325.0);
}

#[test]
fn accelerometer_failure_keeps_last_magnitude() {
    let (mut svc, mut hw, mut radio, mut sink) = started();
    hw.accel.push(Ok(accel_g(2.0)));
    svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);
    hw.accel.push(Err(SensorError::ReadFailed));
    svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);

    assert_eq!(svc.last_magnitude(), 2.0);
    assert_eq!(
        sink.events,
        vec![AppEvent::Skipped {
            source: SensorSource::Accelerometer,
            error: SensorError::ReadFailed
        }]
    );
}

// ── Scenario C: battery relay ─────────────────────────────────

#[test]
fn battery_retries_after_failure_in_any_mode() {
    let (mut svc, mut hw, mut radio, mut sink) = started();
    svc.handle(NodeInput::ButtonPress, &mut hw, &mut radio, &mut sink);
    assert_eq!(svc.mode(), Mode::Idle);

    hw.battery.push(Err(SensorError::ReadFailed));
    hw.battery.push(Ok(3.61));

    svc.handle(NodeInput::BatteryUpdate, &mut hw, &mut radio, &mut sink);
    assert_eq!(radio.battery_count(), 0);

    svc.handle(NodeInput::BatteryUpdate, &mut hw, &mut radio, &mut sink);
    assert_eq!(radio.sent, vec![Sent::Battery(3.61)]);
    assert_eq!(svc.stats().battery_published, 1);
}

// ── Scenario D: mode gating ───────────────────────────────────

#[test]
fn idle_suppresses_barometer_until_second_press() {
    let (mut svc, mut hw, mut radio, mut sink) = started();

    svc.handle(NodeInput::ButtonPress, &mut hw, &mut radio, &mut sink);
    assert_eq!(hw.indicator, vec![IndicatorCall::SetMode(Mode::Idle)]);

    for (ms, p) in [(100, 101_000.0), (200, 100_900.0), (300, 100_800.0)] {
        hw.pressure.push(Ok(p));
        hw.at(ms);
        svc.handle(NodeInput::BarometerUpdate, &mut hw, &mut radio, &mut sink);
        svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);
    }
    assert!(radio.sent.is_empty());
    assert_eq!(hw.pressure.reads, 0, "idle handlers do not touch the sensors");

    svc.handle(NodeInput::ButtonPress, &mut hw, &mut radio, &mut sink);
    assert!(svc.is_measuring());

    hw.at(400);
    svc.handle(NodeInput::BarometerUpdate, &mut hw, &mut radio, &mut sink);
    assert_eq!(radio.barometer_count(), 1);

    assert_eq!(
        sink.events[..2],
        [
            AppEvent::ModeChanged {
                from: Mode::Measuring,
                to: Mode::Idle
            },
            AppEvent::ModeChanged {
                from: Mode::Idle,
                to: Mode::Measuring
            },
        ]
    );
}

#[test]
fn idle_suppresses_spikes_and_leaves_no_residue() {
    let (mut svc, mut hw, mut radio, mut sink) = started();

    svc.handle(NodeInput::ButtonPress, &mut hw, &mut radio, &mut sink);
    hw.accel.push(Ok(accel_g(6.0)));
    for ms in [100, 200, 300] {
        hw.at(ms);
        svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);
    }
    assert!(radio.sent.is_empty());
    assert_eq!(hw.pulses(), 0);
    assert_eq!(svc.stats().motion_spikes, 0);
    assert_eq!(hw.accel.reads, 0, "idle never reads the accelerometer");
    assert!(svc.motion_detector().timer().is_ready(Tick::ZERO));

    svc.handle(NodeInput::ButtonPress, &mut hw, &mut radio, &mut sink);
    hw.at(400);
    svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);

    assert_eq!(hw.accel.reads, 1);
    assert_eq!(hw.pulses(), 1);
    assert_eq!(svc.stats().motion_spikes, 1);
    assert_eq!(radio.barometer_count(), 1);
}
