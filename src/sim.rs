//! Synthetic elevator ride for the host build.
//!
//! Plays one minute of a shaft-mounted node's life into the sensor caches:
//!
//! | t (s)   | What happens                                   |
//! |---------|------------------------------------------------|
//! | 0–5     | parked at ground floor                         |
//! | 5       | start jolt (5.2 g for 300 ms)                  |
//! | 5–15    | ride up 30 m (pressure falls ~360 Pa)          |
//! | 15      | stop jolt (4.6 g)                              |
//! | 20      | button: Measuring → Idle                       |
//! | 25      | jolt while idle (ignored)                      |
//! | 30      | button: Idle → Measuring                       |
//! | 35–45   | ride back down                                 |
//! | 50–51   | climate module read failures                   |
//!
//! Deterministic: the "noise" is a fixed sine so every run prints the same
//! publications.

use elevator_monitor::detect::AccelVector;
use elevator_monitor::drivers::button::button_isr_handler;
use elevator_monitor::sensors::SensorHub;
use elevator_monitor::sensors::climate::SEA_LEVEL_PA;
use elevator_monitor::tick::Tick;

/// Total simulated time.
pub const RIDE_LENGTH_MS: u64 = 60_000;

/// Pressure drop per metre of climb near sea level.
const PA_PER_METRE: f32 = 12.0;
const RIDE_HEIGHT_M: f32 = 30.0;
const NOISE_PA: f32 = 0.6;

const REST: AccelVector = AccelVector::new(0.0, 0.0, 1.0);

const BUTTON_PRESSES_MS: [u64; 2] = [20_000, 30_000];

#[derive(Default)]
pub struct ElevatorRide {
    next_press: usize,
}

impl ElevatorRide {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the samples for `now` into the caches and fire scripted button
    /// edges.
    pub fn feed(&mut self, now: Tick, sensors: &SensorHub) {
        let ms = now.as_millis();

        if (50_000..51_000).contains(&ms) {
            sensors.climate.mark_failed();
        } else {
            sensors.climate.store_pressure(pressure_at(ms));
        }

        sensors.accelerometer.store(accel_at(ms));

        // Slow drain: 3.70 V falling 1 mV per simulated second.
        sensors.battery.store(3.70 - ms as f32 / 1_000_000.0);

        if let Some(&press_ms) = BUTTON_PRESSES_MS.get(self.next_press) {
            if ms >= press_ms {
                button_isr_handler(ms as u32);
                self.next_press += 1;
            }
        }
    }
}

fn height_at(ms: u64) -> f32 {
    let ramp = |from: u64, to: u64| ((ms.saturating_sub(from)) as f32 / (to - from) as f32).min(1.0);
    match ms {
        0..5_000 => 0.0,
        5_000..15_000 => RIDE_HEIGHT_M * ramp(5_000, 15_000),
        15_000..35_000 => RIDE_HEIGHT_M,
        35_000..45_000 => RIDE_HEIGHT_M * (1.0 - ramp(35_000, 45_000)),
        _ => 0.0,
    }
}

fn pressure_at(ms: u64) -> f32 {
    let noise = NOISE_PA * (ms as f32 / 700.0).sin();
    SEA_LEVEL_PA - height_at(ms) * PA_PER_METRE + noise
}

fn accel_at(ms: u64) -> AccelVector {
    match ms {
        5_000..5_300 => AccelVector::new(0.4, 0.3, 5.2),
        15_000..15_200 => AccelVector::new(-0.2, 0.5, -4.6),
        25_000..25_200 => AccelVector::new(3.0, 3.0, 2.0),
        _ => REST,
    }
}
