//! Measuring / Idle mode controller.
//!
//! The node has exactly one operator-controlled switch: a button press
//! flips between measuring (barometer and accelerometer publications
//! enabled) and idle.  Battery telemetry ignores the mode entirely.
//!
//! ```text
//!             press
//!  Measuring ───────▶ Idle
//!      ▲               │
//!      └───────────────┘
//!             press
//! ```

use log::info;

use crate::app::ports::IndicatorPort;

/// Node-wide operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Mode {
    /// Sensor-driven publications enabled.  Indicator solid on.
    #[default]
    Measuring = 0,
    /// Sensor-driven publications suppressed.  Indicator off.
    Idle = 1,
}

impl Mode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Measuring => Self::Idle,
            Self::Idle => Self::Measuring,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Measuring => "measuring",
            Self::Idle => "idle",
        }
    }
}

/// Holds the current [`Mode`] and mirrors it onto the indicator.
#[derive(Debug, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    /// Boot state is [`Mode::Measuring`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the mode and drive the indicator to match.
    /// Returns the new mode.
    pub fn toggle(&mut self, indicator: &mut impl IndicatorPort) -> Mode {
        let from = self.mode;
        self.mode = from.toggled();
        indicator.set_mode(self.mode);
        info!("Mode: {} -> {}", from.name(), self.mode.name());
        self.mode
    }

    /// Re-assert the indicator for the current mode (boot, after a pulse).
    pub fn sync_indicator(&self, indicator: &mut impl IndicatorPort) {
        indicator.set_mode(self.mode);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_measuring(&self) -> bool {
        self.mode == Mode::Measuring
    }
}
