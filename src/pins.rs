//! GPIO / peripheral pin assignments for the monitor node board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// User button (active-low with external pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button that toggles Measuring / Idle.
pub const BUTTON_GPIO: i32 = 0;

// ---------------------------------------------------------------------------
// Status LED (single discrete LED, active high)
// ---------------------------------------------------------------------------

pub const LED_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Battery monitor (ADC1)
// ---------------------------------------------------------------------------

/// Cell voltage through a 1:2 divider.  ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const BATTERY_ADC_GPIO: i32 = 1;
