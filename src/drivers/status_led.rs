//! Single status LED.
//!
//! Solid on while measuring, off while idle.  A pulse flips the LED to the
//! opposite level for a short time; [`StatusLed::tick`] restores the mode
//! level once the pulse deadline passes, so nothing ever blocks.
//!
//! ## Dual-target design
//!
//! Generic over any `embedded_hal::digital::OutputPin`: an `esp-idf-hal`
//! `PinDriver` on the node, [`SimPin`] on the host.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::warn;

use crate::mode::Mode;
use crate::tick::Tick;

pub struct StatusLed<P> {
    pin: P,
    mode_level: bool,
    pulse_until: Option<Tick>,
}

impl<P: OutputPin> StatusLed<P> {
    /// Wraps `pin` and drives it low.
    pub fn new(pin: P) -> Self {
        let mut led = Self {
            pin,
            mode_level: false,
            pulse_until: None,
        };
        led.drive(false);
        led
    }

    /// Solid level for `mode`.  Cancels any running pulse.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode_level = mode == Mode::Measuring;
        self.pulse_until = None;
        self.drive(self.mode_level);
    }

    /// Flip the LED until `now + duration_ms`.  A pulse during a pulse
    /// extends it.
    pub fn pulse(&mut self, now: Tick, duration_ms: u16) {
        self.pulse_until = Some(now.add_millis(u32::from(duration_ms)));
        self.drive(!self.mode_level);
    }

    /// End an expired pulse.  Call every main-loop pass.
    pub fn tick(&mut self, now: Tick) {
        match self.pulse_until {
            Some(until) if now >= until => {
                self.pulse_until = None;
                self.drive(self.mode_level);
            }
            _ => {}
        }
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse_until.is_some()
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    fn drive(&mut self, on: bool) {
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = result {
            warn!("Status LED write failed: {:?}", e);
        }
    }
}

/// In-memory output pin for the host simulator and tests.
#[derive(Debug, Default)]
pub struct SimPin {
    high: bool,
    writes: u32,
}

impl SimPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    /// Number of level writes so far.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}
