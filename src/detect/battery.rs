//! Battery relay.
//!
//! Stateless: every successful battery reading is published, in any mode.
//! Battery health must stay observable even while the node is idle.

use crate::app::ports::BatteryPort;
use crate::error::SensorError;

#[derive(Debug, Clone, Copy, Default)]
pub struct BatteryRelay;

impl BatteryRelay {
    pub const fn new() -> Self {
        Self
    }

    /// Voltage to publish for this update.
    pub fn on_update(&self, battery: &mut impl BatteryPort) -> Result<f32, SensorError> {
        battery.read_voltage()
    }
}
