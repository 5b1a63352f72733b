//! Clock adapters.
//!
//! - [`MonotonicClock`]: the real clock.
//!   - **`target_os = "espidf"`** wraps `esp_timer_get_time()` from the
//!     ESP-IDF high-resolution timer (microsecond precision, monotonic).
//!   - **`not(target_os = "espidf")`** uses `std::time::Instant`.
//! - [`ManualClock`]: advanced explicitly; drives the host simulator and
//!   tests in simulated time.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::app::ports::ClockPort;
use crate::tick::Tick;

/// Milliseconds since boot.
pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl ClockPort for MonotonicClock {
    #[cfg(target_os = "espidf")]
    fn now(&self) -> Tick {
        // SAFETY: esp_timer_get_time reads the monotonic RTC counter.
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        Tick::from_millis(us.max(0) as u64 / 1_000)
    }

    #[cfg(not(target_os = "espidf"))]
    fn now(&self) -> Tick {
        Tick::from_millis(self.start.elapsed().as_millis() as u64)
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Tick) -> Self {
        Self {
            now_ms: AtomicU64::new(start.as_millis()),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::Relaxed);
    }

    /// Jump to `t`.  Earlier ticks are ignored so time never runs backwards.
    pub fn set(&self, t: Tick) {
        self.now_ms.fetch_max(t.as_millis(), Ordering::Relaxed);
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> Tick {
        Tick::from_millis(self.now_ms.load(Ordering::Relaxed))
    }
}
