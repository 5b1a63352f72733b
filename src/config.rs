//! Node configuration parameters
//!
//! All tunable parameters for the monitor node.  The values are fixed at
//! boot: there is no runtime reconfiguration path, so `validate()` runs
//! once before the event loop starts.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::radio::CHANNEL_R1_I2C0_ADDRESS_DEFAULT;
use crate::radio::packet::NODE_NAME_CAP;

/// Name announced in the pairing request.
pub const DEFAULT_NODE_NAME: &str = "elevator-monitor";

const _: () = assert!(DEFAULT_NODE_NAME.len() <= NODE_NAME_CAP);

/// [`DEFAULT_NODE_NAME`] in its fixed-capacity buffer.
fn default_node_name() -> heapless::String<NODE_NAME_CAP> {
    // The const assertion above rules out the empty fallback.
    heapless::String::try_from(DEFAULT_NODE_NAME).unwrap_or_default()
}

/// Core node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    // --- Identity ---
    /// Node name sent with the pairing request
    pub node_name: heapless::String<NODE_NAME_CAP>,
    /// Radio channel id used for barometer publications
    pub barometer_channel: u8,

    // --- Pressure change detection ---
    /// Minimum pressure change (Pa) since the last publish to publish again
    pub pressure_change_threshold_pa: f32,
    /// Keep-alive floor: publish at least this often (milliseconds)
    pub pressure_keepalive_ms: u32,

    // --- Motion spike detection ---
    /// Acceleration magnitude (g) that counts as a spike
    pub motion_spike_threshold_g: f32,
    /// Minimum time between two spike publications (milliseconds)
    pub motion_refractory_ms: u32,
    /// Indicator pulse length on a spike (milliseconds)
    pub motion_pulse_ms: u16,

    // --- Sensor cadences ---
    /// Accelerometer update interval (milliseconds)
    pub accelerometer_interval_ms: u32,
    /// Barometer update interval (milliseconds)
    pub barometer_interval_ms: u32,
    /// Battery update interval (milliseconds)
    pub battery_interval_ms: u32,

    // --- Accelerometer ---
    /// Full-scale range (g); readings are clamped to +/- this value
    pub accel_full_scale_g: u8,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_name: default_node_name(),
            barometer_channel: CHANNEL_R1_I2C0_ADDRESS_DEFAULT,

            // Pressure
            pressure_change_threshold_pa: 3.0,
            pressure_keepalive_ms: 15 * 60 * 1000, // 15 min

            // Motion
            motion_spike_threshold_g: 4.0,
            motion_refractory_ms: 1500,
            motion_pulse_ms: 100,

            // Cadences
            accelerometer_interval_ms: 100,      // 10 Hz
            barometer_interval_ms: 100,          // 10 Hz
            battery_interval_ms: 60 * 60 * 1000, // 1/h

            accel_full_scale_g: 16,
        }
    }
}

impl NodeConfig {
    /// Reject values that would make a detector degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.node_name.is_empty() {
            return Err(Error::Config("node_name must not be empty"));
        }
        if !(self.pressure_change_threshold_pa.is_finite() && self.pressure_change_threshold_pa > 0.0) {
            return Err(Error::Config("pressure_change_threshold_pa must be > 0"));
        }
        if self.pressure_keepalive_ms == 0 {
            return Err(Error::Config("pressure_keepalive_ms must be > 0"));
        }
        if !(self.motion_spike_threshold_g.is_finite() && self.motion_spike_threshold_g > 0.0) {
            return Err(Error::Config("motion_spike_threshold_g must be > 0"));
        }
        if self.motion_spike_threshold_g >= f32::from(self.accel_full_scale_g) {
            return Err(Error::Config("motion_spike_threshold_g must be below full scale"));
        }
        if self.accelerometer_interval_ms == 0
            || self.barometer_interval_ms == 0
            || self.battery_interval_ms == 0
        {
            return Err(Error::Config("sensor intervals must be > 0"));
        }
        Ok(())
    }
}
