//! Fuzz target: `FrameDecoder::feed` + `RadioPacket::decode`
//!
//! Drives arbitrary byte sequences into the streaming frame decoder, decodes
//! every frame it yields, and asserts that nothing panics, payload lengths
//! stay within one radio frame, and any packet that decodes re-encodes into
//! a frame that fits.
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use elevator_monitor::radio::{FrameDecoder, MAX_FRAME_PAYLOAD, RadioPacket};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = FrameDecoder::new();
    let mut rest = data;

    while let Some(payload) = decoder.feed(&mut rest) {
        assert!(!payload.is_empty(), "decoder must not yield empty payload");
        assert!(payload.len() <= MAX_FRAME_PAYLOAD, "payload exceeds one frame");

        if let Ok(packet) = RadioPacket::decode(payload) {
            let mut buf = [0u8; MAX_FRAME_PAYLOAD];
            assert!(packet.encode(&mut buf).is_ok(), "decoded packet must re-encode");
        }
    }
    assert!(rest.is_empty(), "decoder consumes all input");

    // After a reset the decoder must accept bytes cleanly again.
    decoder.reset();
    let mut again = data;
    while decoder.feed(&mut again).is_some() {}
});
