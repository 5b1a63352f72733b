//! Unified error types for the monitor firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! boot path's error handling uniform.  All variants are `Copy` so they can
//! travel through the event sink and detector outcomes without allocation.
//!
//! None of these are fatal to the event loop: sensor and radio errors are
//! absorbed per cycle, config errors only occur before the loop
//! starts.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or a derived value could not be computed.
    Sensor(SensorError),
    /// A radio packet could not be encoded, framed or written.
    Radio(RadioError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Radio(e) => write!(f, "radio: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The driver reported a failed measurement.
    ReadFailed,
    /// No measurement has been delivered since boot.
    NotReady,
    /// Altitude could not be derived from the pressure reading.
    DerivedValueUnavailable,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "read failed"),
            Self::NotReady => write!(f, "no reading yet"),
            Self::DerivedValueUnavailable => write!(f, "derived value unavailable"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Radio errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioError {
    /// Packet did not fit the encode buffer.
    Encode,
    /// Bytes did not decode into a known packet.
    Decode,
    /// Payload exceeds the maximum frame size.
    FrameTooLarge,
    /// The transport rejected the write.
    TransportWrite,
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => write!(f, "packet encode failed"),
            Self::Decode => write!(f, "packet decode failed"),
            Self::FrameTooLarge => write!(f, "frame too large"),
            Self::TransportWrite => write!(f, "transport write failed"),
        }
    }
}

impl From<RadioError> for Error {
    fn from(e: RadioError) -> Self {
        Self::Radio(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
