//! Length-prefix frame codec.
//!
//! Wire format:
//! ```text
//! ┌────────────┬──────────────────────────┐
//! │ Length (1B)│ postcard payload (N B)   │
//! │ u8, 1..=62 │                          │
//! └────────────┴──────────────────────────┘
//! ```
//!
//! The decoder accumulates incoming bytes and yields complete frames.  It
//! copes with partial reads (a single receive may hold part of the header,
//! part of the payload, or several frames back to back) and resynchronises
//! on an invalid length byte by dropping it.

use crate::error::RadioError;

/// Maximum frame payload size; keeps a whole frame inside one 64-byte radio buffer.
pub const MAX_FRAME_PAYLOAD: usize = 62;

/// Frame header size (1-byte length).
pub const HEADER_SIZE: usize = 1;

/// Largest encoded frame.
pub const MAX_FRAME_SIZE: usize = HEADER_SIZE + MAX_FRAME_PAYLOAD;

/// Decoder state machine.
enum DecoderState {
    /// Waiting for the length byte.
    ReadingHeader,
    /// Header received, reading payload.
    ReadingPayload { expected: usize, collected: usize },
}

/// Streaming frame decoder.
pub struct FrameDecoder {
    state: DecoderState,
    payload_buf: [u8; MAX_FRAME_PAYLOAD],
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::ReadingHeader,
            payload_buf: [0; MAX_FRAME_PAYLOAD],
        }
    }

    /// Consume bytes from the front of `input` until one frame completes.
    ///
    /// Returns the payload of that frame, with `input` advanced past it, so
    /// callers drain a buffer with `while let Some(p) = dec.feed(&mut rest)`.
    /// Returns `None` once `input` is exhausted without completing a frame.
    pub fn feed(&mut self, input: &mut &[u8]) -> Option<&[u8]> {
        while !input.is_empty() {
            match &mut self.state {
                DecoderState::ReadingHeader => {
                    let len = input[0] as usize;
                    *input = &input[1..];

                    if len == 0 || len > MAX_FRAME_PAYLOAD {
                        // Invalid length; drop the byte and look again.
                        continue;
                    }
                    self.state = DecoderState::ReadingPayload {
                        expected: len,
                        collected: 0,
                    };
                }

                DecoderState::ReadingPayload { expected, collected } => {
                    let to_copy = (*expected - *collected).min(input.len());

                    self.payload_buf[*collected..*collected + to_copy]
                        .copy_from_slice(&input[..to_copy]);
                    *collected += to_copy;
                    *input = &input[to_copy..];

                    if *collected == *expected {
                        let len = *expected;
                        self.state = DecoderState::ReadingHeader;
                        return Some(&self.payload_buf[..len]);
                    }
                }
            }
        }

        None // No complete frame yet.
    }

    /// Reset decoder state (e.g. after the receiver restarts).
    pub fn reset(&mut self) {
        self.state = DecoderState::ReadingHeader;
    }
}

/// Encode a payload into a length-prefixed frame.
///
/// Writes `[len][payload]` into `out_buf` and returns the total length.
pub fn encode_frame(payload: &[u8], out_buf: &mut [u8]) -> Result<usize, RadioError> {
    if payload.is_empty() || payload.len() > MAX_FRAME_PAYLOAD {
        return Err(RadioError::FrameTooLarge);
    }
    let total = HEADER_SIZE + payload.len();
    if total > out_buf.len() {
        return Err(RadioError::FrameTooLarge);
    }

    out_buf[0] = payload.len() as u8;
    out_buf[HEADER_SIZE..total].copy_from_slice(payload);

    Ok(total)
}
