//! Radio link to the base station.
//!
//! ```text
//!  RadioPort ──▶ RadioPacket ──postcard──▶ [len][payload] ──▶ Transport
//! ```
//!
//! - [`packet`]: the packet enum and its postcard encoding
//! - [`codec`]: one-byte length-prefix framing and a streaming decoder
//! - [`transport`]: the byte sink the frames are written to

pub mod codec;
pub mod packet;
pub mod transport;

pub use codec::{FrameDecoder, MAX_FRAME_PAYLOAD, MAX_FRAME_SIZE, encode_frame};
pub use packet::RadioPacket;
pub use transport::{MONITOR_HISTORY, MonitorTransport, NullTransport, Transport};

/// Barometer channel id: sensor R1 on I2C bus 0 at its default address.
pub const CHANNEL_R1_I2C0_ADDRESS_DEFAULT: u8 = 0;
