//! Radio adapter: implements [`RadioPort`] on top of any [`Transport`].
//!
//! Each publication becomes one [`RadioPacket`], postcard-encoded and
//! length-framed into stack buffers, then written in a single call.  The
//! port is fire-and-forget: a failure is logged and counted, never
//! surfaced to the domain.

use log::{debug, warn};

use crate::app::ports::RadioPort;
use crate::error::RadioError;
use crate::radio::{MAX_FRAME_PAYLOAD, MAX_FRAME_SIZE, RadioPacket, Transport, encode_frame};

pub struct RadioAdapter<T> {
    transport: T,
    sent: u32,
    dropped: u32,
}

impl<T: Transport> RadioAdapter<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            sent: 0,
            dropped: 0,
        }
    }

    /// Encode, frame and write one packet.
    pub fn send(&mut self, packet: &RadioPacket) -> Result<(), RadioError> {
        let mut payload = [0u8; MAX_FRAME_PAYLOAD];
        let body = packet.encode(&mut payload)?;

        let mut frame = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(body, &mut frame)?;

        let written = self.transport.write(&frame[..len]).map_err(|e| {
            warn!("Radio transport write error: {:?}", e);
            RadioError::TransportWrite
        })?;
        if written != len {
            warn!("Radio short write: {}/{} bytes", written, len);
            return Err(RadioError::TransportWrite);
        }
        self.transport.flush().map_err(|e| {
            warn!("Radio transport flush error: {:?}", e);
            RadioError::TransportWrite
        })
    }

    /// Packets handed to the transport successfully.
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// Packets lost to encode or transport errors.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn fire(&mut self, packet: &RadioPacket) {
        match self.send(packet) {
            Ok(()) => {
                self.sent += 1;
                debug!("TX {:?}", packet);
            }
            Err(e) => {
                self.dropped += 1;
                warn!("TX dropped ({}): {:?}", e, packet);
            }
        }
    }
}

impl<T: Transport> RadioPort for RadioAdapter<T> {
    fn publish_battery(&mut self, voltage: f32) {
        self.fire(&RadioPacket::Battery { voltage });
    }

    fn publish_barometer(&mut self, channel: u8, pressure: f32, altitude: f32) {
        self.fire(&RadioPacket::Barometer {
            channel,
            pressure_pa: pressure,
            altitude_m: altitude,
        });
    }

    fn pairing_request(&mut self, node_name: &str, firmware_version: &str) {
        match RadioPacket::pairing(node_name, firmware_version) {
            Ok(packet) => self.fire(&packet),
            Err(e) => {
                self.dropped += 1;
                warn!("Pairing request not sent: {}", e);
            }
        }
    }
}
