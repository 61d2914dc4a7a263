use thiserror::Error;

use crate::phase::Phase;
use crate::PacketSide;

/// The stable, matchable error type surfaced at the packet/connection
/// boundary. Internal codec code uses `anyhow::Result` for local control
/// flow; every failure path that can reach a caller maps into one of these
/// variants.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("buffer exhausted while reading {context}")]
    Truncated { context: &'static str },

    #[error("malformed data: {0}")]
    Malformed(String),

    #[error("no packet registered for phase={phase:?} direction={direction:?} opcode={opcode:#x}")]
    UnknownOpcode {
        phase: Phase,
        direction: PacketSide,
        opcode: i32,
    },

    #[error("packet failed validation: {0}")]
    ValidationFailed(String),

    #[error("declared uncompressed length {declared} does not match inflated length {actual}")]
    LengthMismatch { declared: i32, actual: usize },

    #[error("cipher failure: {0}")]
    CryptoFailure(String),

    #[error("attempted to send a packet with no assigned opcode for phase={phase:?} direction={direction:?}")]
    Unregistered { phase: Phase, direction: PacketSide },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ProtocolError {
    fn from(e: std::io::Error) -> Self {
        ProtocolError::Other(e.into())
    }
}

impl From<std::str::Utf8Error> for ProtocolError {
    fn from(e: std::str::Utf8Error) -> Self {
        ProtocolError::Malformed(e.to_string())
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(e: serde_json::Error) -> Self {
        ProtocolError::Malformed(e.to_string())
    }
}

impl From<uuid::Error> for ProtocolError {
    fn from(e: uuid::Error) -> Self {
        ProtocolError::Malformed(e.to_string())
    }
}

impl From<mc_nbt::NbtError> for ProtocolError {
    fn from(e: mc_nbt::NbtError) -> Self {
        ProtocolError::Malformed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
