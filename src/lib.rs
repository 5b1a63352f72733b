//! Elevator monitor node firmware library.
//!
//! Exposes the pure-logic modules for integration testing and the host
//! simulator. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod detect;
pub mod error;
pub mod events;
pub mod mode;
pub mod radio;
pub mod scheduler;
pub mod tick;

pub mod adapters;
pub mod drivers;
pub mod pins;
pub mod sensors;
