//! Elevator Monitor Firmware: Main Entry Point
//!
//! Hexagonal architecture with event-driven, run-to-completion execution.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          LogEventSink     RadioAdapter        │
//! │  (clock, sensors, LED)    (EventSink)      (RadioPort)         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              NodeService (pure logic)                  │    │
//! │  │  Mode · PressureChange · MotionSpike · BatteryRelay    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  SensorScheduler (delegate-driven) · ButtonDriver · EventQueue │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! On the node the loop runs forever against the real clock.  On the host
//! it plays a scripted elevator ride in simulated time and exits.
#![deny(unused_must_use)]

#[cfg(not(target_os = "espidf"))]
mod sim;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use embedded_hal::digital::OutputPin;
use log::{info, warn};

use elevator_monitor::adapters::hardware::HardwareAdapter;
use elevator_monitor::adapters::log_sink::LogEventSink;
use elevator_monitor::adapters::radio::RadioAdapter;
use elevator_monitor::app::events::SensorSource;
use elevator_monitor::app::inputs::NodeInput;
use elevator_monitor::app::ports::{ClockPort, SchedulerDelegate};
use elevator_monitor::app::service::NodeService;
use elevator_monitor::config::NodeConfig;
use elevator_monitor::drivers::button::{ButtonDriver, ButtonEvent};
use elevator_monitor::events::{drain_events, push_event};
use elevator_monitor::radio::Transport;
use elevator_monitor::scheduler::SensorScheduler;
use elevator_monitor::{drivers, pins};

// ── Scheduler delegate ────────────────────────────────────────
//
// Bridges the scheduler (which knows nothing about the event system)
// to the ISR event queue.

struct EventQueueDelegate;

impl SchedulerDelegate for EventQueueDelegate {
    fn on_sensor_due(&mut self, source: SensorSource) {
        if !push_event(source.into()) {
            warn!("Event queue full, {} update dropped", source.name());
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Platform bootstrap + logging ───────────────────────
    init_logging()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Elevator Monitor v{:<18}║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (fixed at build time) ────────────────
    let config = NodeConfig::default();
    config.validate()?;

    // ── 3. Peripherals ────────────────────────────────────────
    drivers::hw_init::init_peripherals()?;
    if let Err(e) = drivers::hw_init::init_isr_service() {
        log::error!("ISR service init failed: {}; button disabled", e);
    }

    run(config)
}

#[cfg(target_os = "espidf")]
fn init_logging() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn init_logging() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    Ok(())
}

// ── Event loop pass ───────────────────────────────────────────

/// Everything the loop owns besides the hardware.
struct Node<T> {
    service: NodeService,
    radio: RadioAdapter<T>,
    sink: LogEventSink,
    sched: SensorScheduler,
    button: ButtonDriver,
}

impl<T: Transport> Node<T> {
    fn boot<P: OutputPin, C: ClockPort>(
        config: NodeConfig,
        hw: &mut HardwareAdapter<'_, P, C>,
        transport: T,
    ) -> Self {
        let now = hw.now();
        let mut sched = SensorScheduler::new(&config, now);
        // First battery report right away instead of an hour after boot.
        sched.trigger_now(SensorSource::Battery, now);

        let mut node = Self {
            service: NodeService::new(config),
            radio: RadioAdapter::new(transport),
            sink: LogEventSink::new(),
            sched,
            button: ButtonDriver::new(pins::BUTTON_GPIO),
        };
        node.service.start(hw, &mut node.radio, &mut node.sink);
        info!("System ready. Entering event loop.");
        node
    }

    /// One loop pass: collect inputs, dispatch them in order, settle the LED.
    fn pass<P: OutputPin, C: ClockPort>(&mut self, hw: &mut HardwareAdapter<'_, P, C>) {
        let now = hw.now();

        if self.button.tick(now.as_millis() as u32) == Some(ButtonEvent::Press)
            && !push_event(NodeInput::ButtonPress)
        {
            warn!("Event queue full, button press dropped");
        }
        self.sched.poll(now, &mut EventQueueDelegate);

        let Self {
            service,
            radio,
            sink,
            ..
        } = self;
        drain_events(|input| {
            #[cfg(target_os = "espidf")]
            {
                if input == NodeInput::BatteryUpdate {
                    hw.sensors().battery.sample();
                }
            }
            service.handle(input, hw, radio, sink);
        });

        hw.tick_indicator();
    }
}

// ── Node ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn run(config: NodeConfig) -> Result<()> {
    use elevator_monitor::adapters::time::MonotonicClock;
    use elevator_monitor::drivers::status_led::StatusLed;
    use elevator_monitor::radio::NullTransport;
    use elevator_monitor::sensors::SensorHub;
    use esp_idf_hal::delay::FreeRtos;
    use esp_idf_hal::gpio::{AnyOutputPin, PinDriver};

    /// Longest sleep between passes; keeps button debounce responsive.
    const MAX_IDLE_MS: u64 = 10;

    // SAFETY: LED_GPIO is claimed by nothing else in the firmware.
    let led_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::LED_GPIO) })?;

    let sensors = SensorHub::new(config.accel_full_scale_g);
    let mut hw = HardwareAdapter::new(&sensors, StatusLed::new(led_pin), MonotonicClock::new());

    // The radio peripheral driver plugs in here as a `Transport`.
    let mut node = Node::boot(config, &mut hw, NullTransport);

    loop {
        node.pass(&mut hw);
        let wait = node.sched.next_deadline().millis_since(hw.now());
        FreeRtos::delay_ms(wait.clamp(1, MAX_IDLE_MS) as u32);
    }
}

// ── Host simulator ────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
fn run(config: NodeConfig) -> Result<()> {
    use elevator_monitor::adapters::time::ManualClock;
    use elevator_monitor::drivers::status_led::{SimPin, StatusLed};
    use elevator_monitor::radio::MonitorTransport;
    use elevator_monitor::sensors::SensorHub;
    use elevator_monitor::tick::Tick;

    /// Simulated time per loop pass.
    const STEP_MS: u64 = 10;

    let sensors = SensorHub::new(config.accel_full_scale_g);
    let mut hw = HardwareAdapter::new(
        &sensors,
        StatusLed::new(SimPin::new()),
        ManualClock::new(Tick::ZERO),
    );
    let mut ride = sim::ElevatorRide::new();
    ride.feed(hw.now(), &sensors);

    let mut node = Node::boot(config, &mut hw, MonitorTransport::new());

    while hw.now().as_millis() < sim::RIDE_LENGTH_MS {
        hw.clock().advance(STEP_MS);
        ride.feed(hw.now(), &sensors);
        node.pass(&mut hw);
    }

    let stats = node.service.stats();
    info!(
        "Ride finished: battery={} barometer={} spikes={} skipped={} | radio sent={} dropped={} received={}",
        stats.battery_published,
        stats.barometer_published,
        stats.motion_spikes,
        stats.skipped,
        node.radio.sent(),
        node.radio.dropped(),
        node.radio.transport().received_total(),
    );
    Ok(())
}
