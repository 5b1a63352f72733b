//! Transport abstraction: any byte-oriented outbound channel.
//!
//! Concrete implementations:
//! - [`NullTransport`]: discards everything (radio disabled)
//! - [`MonitorTransport`]: decodes frames back into packets and logs them
//!   as JSON; the host simulator's stand-in for a base station
//! - the node's radio peripheral (ESP-IDF builds)
//!
//! [`RadioAdapter`](crate::adapters::radio::RadioAdapter) is generic over
//! `Transport`, so swapping the link requires no change to packet logic.

use heapless::Deque;
use log::{info, warn};

use super::codec::FrameDecoder;
use super::packet::RadioPacket;

/// Byte-oriented outbound channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// A null transport that accepts and discards all writes.
pub struct NullTransport;

impl Transport for NullTransport {
    type Error = ();

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

/// Packets a [`MonitorTransport`] remembers; older ones are evicted.
pub const MONITOR_HISTORY: usize = 64;

/// Loopback receiver: reassembles frames, decodes them and keeps the
/// most recent [`MONITOR_HISTORY`] packets.
#[derive(Default)]
pub struct MonitorTransport {
    decoder: FrameDecoder,
    received: Deque<RadioPacket, MONITOR_HISTORY>,
    received_total: u32,
    rejected: u32,
}

impl MonitorTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retained packets, oldest first.
    pub fn packets(&self) -> impl DoubleEndedIterator<Item = &RadioPacket> + ExactSizeIterator {
        self.received.iter()
    }

    /// Most recently decoded packet.
    pub fn last_packet(&self) -> Option<&RadioPacket> {
        self.received.back()
    }

    /// Packets decoded since creation, including evicted ones.
    pub fn received_total(&self) -> u32 {
        self.received_total
    }

    /// Frames that arrived intact but failed to decode.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    fn accept(&mut self, packet: RadioPacket) {
        match serde_json::to_string(&packet) {
            Ok(json) => info!("RX {json}"),
            Err(e) => warn!("RX {:?} (json: {})", packet, e),
        }
        if self.received.is_full() {
            self.received.pop_front();
        }
        if self.received.push_back(packet).is_err() {
            warn!("RX history full, packet not retained");
        }
        self.received_total += 1;
    }
}

impl Transport for MonitorTransport {
    type Error = core::convert::Infallible;

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        let mut rest = data;
        let mut decoded = Vec::new();
        while let Some(payload) = self.decoder.feed(&mut rest) {
            decoded.push(RadioPacket::decode(payload));
        }
        for result in decoded {
            match result {
                Ok(packet) => self.accept(packet),
                Err(e) => {
                    self.rejected += 1;
                    warn!("RX undecodable frame: {}", e);
                }
            }
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
