//! Publication decision rules.
//!
//! Each detector owns its own timing state and decides, per sensor update,
//! whether the reading is worth a radio publication:
//!
//! | Detector                 | State             | Rule                                  |
//! |--------------------------|-------------------|---------------------------------------|
//! | [`PressureChangeDetector`] | [`PublishGate`]   | `|Δp| >= threshold` OR keep-alive due |
//! | [`MotionSpikeDetector`]  | [`RefractoryTimer`] | `|a| > threshold` AND window elapsed  |
//! | [`BatteryRelay`]         | none              | always                                |
//!
//! Mode gating lives in the service, not here: a detector that is not
//! called does not advance.

pub mod battery;
pub mod motion;
pub mod pressure;

pub use battery::BatteryRelay;
pub use motion::{AccelVector, MotionOutcome, MotionSpikeDetector, RefractoryTimer};
pub use pressure::{PressureChangeDetector, PressureOutcome, PublishGate};
