//! Radio packet definitions.
//!
//! Packets are serialised with `postcard` into a caller-provided buffer, so
//! encoding never allocates.  Every packet fits in one radio frame
//! ([`MAX_FRAME_PAYLOAD`](super::codec::MAX_FRAME_PAYLOAD) bytes).

use serde::{Deserialize, Serialize};

use crate::error::RadioError;

/// Maximum node name length carried in a pairing request.
pub const NODE_NAME_CAP: usize = 32;

/// Maximum firmware version length carried in a pairing request.
pub const VERSION_CAP: usize = 16;

/// Everything the node ever sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RadioPacket {
    /// Sent once at startup so the base station can register the node.
    PairingRequest {
        node_name: heapless::String<NODE_NAME_CAP>,
        firmware_version: heapless::String<VERSION_CAP>,
    },
    Battery {
        voltage: f32,
    },
    /// Shared by pressure-change, keep-alive and motion-spike publications.
    Barometer {
        channel: u8,
        pressure_pa: f32,
        altitude_m: f32,
    },
}

impl RadioPacket {
    /// Build a pairing request; names longer than the wire caps are rejected.
    pub fn pairing(node_name: &str, firmware_version: &str) -> Result<Self, RadioError> {
        let mut name = heapless::String::new();
        name.push_str(node_name).map_err(|()| RadioError::Encode)?;
        let mut version = heapless::String::new();
        version
            .push_str(firmware_version)
            .map_err(|()| RadioError::Encode)?;
        Ok(Self::PairingRequest {
            node_name: name,
            firmware_version: version,
        })
    }

    /// Serialise into `buf`, returning the used prefix.
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], RadioError> {
        postcard::to_slice(self, buf).map_err(|_| RadioError::Encode)
    }

    /// Parse a frame payload.
    pub fn decode(bytes: &[u8]) -> Result<Self, RadioError> {
        postcard::from_bytes(bytes).map_err(|_| RadioError::Decode)
    }
}
