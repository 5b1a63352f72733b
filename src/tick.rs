//! Monotonic millisecond tick.
//!
//! Every timeout in the node (keep-alive floor, refractory window, sensor
//! cadences) is a plain comparison against a [`Tick`].  Nothing is ever
//! scheduled as a callback; the clock only has to be non-decreasing.

use core::fmt;

/// Milliseconds since boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tick(u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// `self + ms`, pinned at `u64::MAX` instead of wrapping.
    pub const fn add_millis(self, ms: u32) -> Self {
        Self(self.0.saturating_add(ms as u64))
    }

    /// Milliseconds elapsed from `earlier` to `self` (0 if `earlier` is later).
    pub const fn millis_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
