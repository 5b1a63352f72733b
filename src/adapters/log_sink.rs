//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on the node, stderr on the host).

use log::{info, warn};

use crate::app::events::{AppEvent, Publication};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => {
                info!("START | mode={}", mode.name());
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE  | {} -> {}", from.name(), to.name());
            }
            AppEvent::Published {
                at,
                publication: Publication::Battery { voltage },
            } => {
                info!("PUB   | t={} | battery={:.3}V", at, voltage);
            }
            AppEvent::Published {
                at,
                publication:
                    Publication::Barometer {
                        trigger,
                        pressure,
                        altitude,
                    },
            } => {
                info!(
                    "PUB   | t={} | {:?} | p={:.1}Pa alt={:.2}m",
                    at, trigger, pressure, altitude
                );
            }
            AppEvent::Skipped { source, error } => {
                warn!("SKIP  | {} | {}", source.name(), error);
            }
        }
    }
}
