//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the decision rules of the monitor node: mode
//! gating, pressure change detection and motion spike detection.  All
//! interaction with hardware and the radio happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod events;
pub mod inputs;
pub mod ports;
pub mod service;
