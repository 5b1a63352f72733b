//! End-to-end tests on the real adapters: sensor caches, simulated LED
//! pin, manual clock, and a radio adapter writing into the monitor
//! transport.  What the monitor decodes is exactly what the base station
//! would receive.

use elevator_monitor::adapters::hardware::HardwareAdapter;
use elevator_monitor::adapters::radio::RadioAdapter;
use elevator_monitor::adapters::time::ManualClock;
use elevator_monitor::app::events::SensorSource;
use elevator_monitor::app::inputs::NodeInput;
use elevator_monitor::app::ports::{ClockPort, SchedulerDelegate};
use elevator_monitor::app::service::NodeService;
use elevator_monitor::config::NodeConfig;
use elevator_monitor::detect::AccelVector;
use elevator_monitor::drivers::status_led::{SimPin, StatusLed};
use elevator_monitor::events::{drain_events, push_event};
use elevator_monitor::radio::{CHANNEL_R1_I2C0_ADDRESS_DEFAULT, MonitorTransport, RadioPacket};
use elevator_monitor::scheduler::SensorScheduler;
use elevator_monitor::sensors::SensorHub;
use elevator_monitor::tick::Tick;

use crate::mock_hw::VecSink;

type SimHardware<'a> = HardwareAdapter<'a, SimPin, ManualClock>;

fn hardware(hub: &SensorHub) -> SimHardware<'_> {
    HardwareAdapter::new(hub, StatusLed::new(SimPin::new()), ManualClock::new(Tick::ZERO))
}

#[test]
fn boot_and_spike_reach_the_base_station() {
    let hub = SensorHub::new(16);
    let mut hw = hardware(&hub);
    let mut radio = RadioAdapter::new(MonitorTransport::new());
    let mut sink = VecSink::new();
    let mut svc = NodeService::new(NodeConfig::default());

    svc.start(&mut hw, &mut radio, &mut sink);
    assert!(hw.led().pin().is_high(), "measuring shows solid LED");

    hub.climate.store_pressure(101_325.0);
    hub.accelerometer.store(AccelVector::new(0.0, 1.0, 1.0));
    hw.clock().advance(100);
    svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);

    hub.accelerometer.store(AccelVector::new(0.0, 3.0, 5.0));
    hw.clock().advance(100);
    svc.handle(NodeInput::AccelerometerUpdate, &mut hw, &mut radio, &mut sink);
    assert!(!hw.led().pin().is_high(), "spike pulse flips the LED");

    hw.clock().advance(100);
    hw.tick_indicator();
    assert!(hw.led().pin().is_high(), "pulse ends after motion_pulse_ms");

    let packets: Vec<_> = radio.transport().packets().collect();
    assert_eq!(packets.len(), 2);
    assert_eq!(
        *packets[0],
        RadioPacket::pairing("elevator-monitor", env!("CARGO_PKG_VERSION")).unwrap()
    );
    match *packets[1] {
        RadioPacket::Barometer {
            channel,
            pressure_pa,
            altitude_m,
        } => {
            assert_eq!(channel, CHANNEL_R1_I2C0_ADDRESS_DEFAULT);
            assert_eq!(pressure_pa, 101_325.0);
            assert!(altitude_m.abs() < 0.01);
        }
        ref other => panic!("expected barometer packet, got {other:?}"),
    }
    assert_eq!(radio.dropped(), 0);
}

#[test]
fn climate_failure_and_idle_mode_through_real_caches() {
    let hub = SensorHub::new(16);
    let mut hw = hardware(&hub);
    let mut radio = RadioAdapter::new(MonitorTransport::new());
    let mut sink = VecSink::new();
    let mut svc = NodeService::new(NodeConfig::default());
    svc.start(&mut hw, &mut radio, &mut sink);

    // Nothing delivered yet: NotReady, skipped.
    svc.handle(NodeInput::BarometerUpdate, &mut hw, &mut radio, &mut sink);
    assert_eq!(svc.stats().skipped, 1);

    // Pressure the altitude formula rejects.
    hub.climate.store_pressure(-1.0);
    svc.handle(NodeInput::BarometerUpdate, &mut hw, &mut radio, &mut sink);
    assert_eq!(svc.stats().skipped, 2);
    assert_eq!(svc.stats().barometer_published, 0);

    hub.climate.store_pressure(100_000.0);
    svc.handle(NodeInput::BarometerUpdate, &mut hw, &mut radio, &mut sink);
    assert_eq!(svc.stats().barometer_published, 1);

    svc.handle(NodeInput::ButtonPress, &mut hw, &mut radio, &mut sink);
    assert!(!hw.led().pin().is_high(), "idle turns the LED off");

    hub.climate.store_pressure(90_000.0);
    hub.battery.store(3.3);
    svc.handle(NodeInput::BarometerUpdate, &mut hw, &mut radio, &mut sink);
    svc.handle(NodeInput::BatteryUpdate, &mut hw, &mut radio, &mut sink);

    let stats = svc.stats();
    assert_eq!(stats.barometer_published, 1);
    assert_eq!(stats.battery_published, 1);
    assert_eq!(
        radio.transport().last_packet(),
        Some(&RadioPacket::Battery { voltage: 3.3 })
    );
}

struct QueueDelegate;

impl SchedulerDelegate for QueueDelegate {
    fn on_sensor_due(&mut self, source: SensorSource) {
        assert!(push_event(source.into()));
    }
}

// The event queue is process-wide, so this is the only test in the binary
// that touches it.
#[test]
fn scheduler_queue_and_service_run_one_second() {
    let hub = SensorHub::new(16);
    let mut hw = hardware(&hub);
    let mut radio = RadioAdapter::new(MonitorTransport::new());
    let mut sink = VecSink::new();
    let config = NodeConfig::default();
    let mut sched = SensorScheduler::new(&config, hw.now());
    let mut svc = NodeService::new(config);
    svc.start(&mut hw, &mut radio, &mut sink);

    sched.trigger_now(SensorSource::Battery, hw.now());
    hub.battery.store(3.9);
    hub.accelerometer.store(AccelVector::new(0.0, 0.0, 1.0));

    let mut inputs = Vec::new();
    for step in 1..=100u64 {
        hw.clock().advance(10);
        // Climb 1 Pa per 100 ms: a publish every third barometer update.
        hub.climate.store_pressure(101_325.0 - (step / 10) as f32);
        sched.poll(hw.now(), &mut QueueDelegate);
        drain_events(|input| {
            inputs.push(input);
            svc.handle(input, &mut hw, &mut radio, &mut sink);
        });
    }

    let count = |want: NodeInput| inputs.iter().filter(|&&i| i == want).count();
    assert_eq!(count(NodeInput::BatteryUpdate), 1);
    assert_eq!(count(NodeInput::AccelerometerUpdate), 10);
    assert_eq!(count(NodeInput::BarometerUpdate), 10);

    // Boot publish at the first update, then every 3 Pa of change.
    let stats = svc.stats();
    assert_eq!(stats.battery_published, 1);
    assert_eq!(stats.barometer_published, 4);
    assert_eq!(stats.motion_spikes, 0);
}
