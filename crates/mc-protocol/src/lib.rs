//! Client-side wire codec for the Minecraft Java Edition network protocol:
//! primitives, a large family of composite value types, NBT, a per-phase
//! packet registry, and the outer framing/compression/encryption layer.
//!
//! This crate does no I/O of its own; it reads from and writes to in-memory
//! byte buffers. [`connection::Connection`] is the thin async driver that
//! actually talks to a socket.

use std::io::Write;

pub mod angle;
pub mod bitset;
pub mod block_entity;
mod bounded;
pub mod buffer;
pub mod connection;
pub mod decode;
pub mod encode;
pub mod entity_metadata;
pub mod error;
mod ident;
mod impls;
pub mod map_icon;
pub mod particle;
pub mod packets;
pub mod phase;
pub mod position;
pub mod profile;
pub mod raw;
pub mod recipe;
pub mod registry;
pub mod slot;
pub mod text;
pub mod trade;
mod uuid_codec;
pub mod var_int;
pub mod var_long;
pub mod vec3;

pub use bounded::Bounded;
pub use buffer::Buffer;
pub use decode::{PacketDecoder, PacketFrame};
pub use encode::{CompressionThreshold, PacketEncoder, WritePacket};
pub use error::{ProtocolError, Result};
pub use mc_ident::Ident;
pub use phase::Phase;
pub use position::BlockPos;
pub use profile::Property;
pub use raw::RawBytes;
pub use slot::ItemStack;
pub use var_int::VarInt;
pub use var_long::VarLong;

/// Current protocol version this crate targets (1.20.1).
pub const PROTOCOL_VERSION: i32 = 763;
pub const MINECRAFT_VERSION: &str = "1.20.1";

/// Frames larger than this are rejected outright; matches the vanilla
/// client's own sanity limit.
pub const MAX_PACKET_SIZE: i32 = 2097152;

/// Encodes `Self` to a writer. Mirrors the shape used throughout this
/// crate's packet structs: no opcode, no framing, just the payload.
pub trait Encode {
    fn encode(&self, w: impl Write) -> anyhow::Result<()>;

    /// Encodes a whole slice of `Self` with no length prefix. The default
    /// implementation encodes each element in turn; `u8` overrides this
    /// with a single `write_all`.
    fn encode_slice(slice: &[Self], mut w: impl Write) -> anyhow::Result<()>
    where
        Self: Sized,
    {
        for value in slice {
            value.encode(&mut w)?;
        }
        Ok(())
    }
}

/// Decodes `Self` from a byte slice, advancing the slice past the consumed
/// bytes. `'a` lets implementors borrow from the input instead of copying
/// (used by string- and byte-slice-backed composites).
pub trait Decode<'a>: Sized {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self>;
}

/// A packet payload: a value with a fixed `(phase, direction, opcode)`
/// identity, plus the usual encode/decode.
pub trait Packet: Encode {
    const OPCODE: i32;
    const PHASE: Phase;
    const SIDE: PacketSide;
    /// Human-readable name, used in logs and error messages.
    const NAME: &'static str;

    /// Cross-field invariant checks beyond what the type system enforces.
    /// The default implementation accepts everything; packets with actual
    /// invariants (BossBar, Respawn, PlayerInfoUpdate, UpdateScore, ...)
    /// override this.
    fn validate(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Direction a packet travels, from the perspective of the side that sent
/// it.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PacketSide {
    Serverbound,
    Clientbound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair(i32, String);

    impl Encode for Pair {
        fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
            VarInt(self.0).encode(&mut w)?;
            self.1.as_str().encode(&mut w)
        }
    }

    impl<'a> Decode<'a> for Pair {
        fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
            let n = VarInt::decode(r)?.0;
            let s = <&str>::decode(r)?.to_owned();
            Ok(Pair(n, s))
        }
    }

    #[test]
    fn basic_round_trip() {
        let original = Pair(42, "hello".to_owned());
        let mut buf = Vec::new();
        original.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        let decoded = Pair::decode(&mut slice).unwrap();
        assert_eq!(original, decoded);
        assert!(slice.is_empty());
    }
}
