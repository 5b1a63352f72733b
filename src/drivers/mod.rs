//! Button and LED drivers, plus one-shot peripheral initialisation.

pub mod button;
pub mod hw_init;
pub mod status_led;
