use std::fmt;
use std::io::Write;

use anyhow::bail;
use bitfield_struct::bitfield;
use thiserror::Error;

use crate::{Decode, Encode};

/// An absolute block position in world space.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn offset(self, x: i32, y: i32, z: i32) -> Self {
        Self::new(self.x + x, self.y + y, self.z + z)
    }

    pub const fn packed(self) -> Result<PackedBlockPos, OutOfRange> {
        match (self.x, self.y, self.z) {
            (-0x2000000..=0x1ffffff, -0x800..=0x7ff, -0x2000000..=0x1ffffff) => {
                Ok(PackedBlockPos::new()
                    .with_x(self.x)
                    .with_y(self.y)
                    .with_z(self.z))
            }
            _ => Err(OutOfRange(self)),
        }
    }
}

/// `y` occupies the low 12 bits, `z` the next 26, `x` the high 26 - matching
/// `(x & 0x3FFFFFF) << 38 | (z & 0x3FFFFFF) << 12 | (y & 0xFFF)`.
#[bitfield(u64)]
#[derive(PartialEq, Eq, PartialOrd, Ord)]
pub struct PackedBlockPos {
    #[bits(12)]
    pub y: i32,
    #[bits(26)]
    pub z: i32,
    #[bits(26)]
    pub x: i32,
}

impl Encode for PackedBlockPos {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.0.encode(w)
    }
}

impl Decode<'_> for PackedBlockPos {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self(u64::decode(r)?))
    }
}

impl Encode for BlockPos {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        match self.packed() {
            Ok(p) => p.encode(w),
            Err(e) => bail!("{e}"),
        }
    }
}

impl Decode<'_> for BlockPos {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        PackedBlockPos::decode(r).map(Into::into)
    }
}

impl From<PackedBlockPos> for BlockPos {
    fn from(p: PackedBlockPos) -> Self {
        Self {
            x: p.x(),
            y: p.y(),
            z: p.z(),
        }
    }
}

impl TryFrom<BlockPos> for PackedBlockPos {
    type Error = OutOfRange;

    fn try_from(pos: BlockPos) -> Result<Self, Self::Error> {
        pos.packed()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
#[error("block position {0} is out of the representable range")]
pub struct OutOfRange(pub BlockPos);

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&(self.x, self.y, self.z), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_matches_literal_vector() {
        // (x=18357644, y=831, z=-20882616) <-> 0x4847861866C5B47F
        let pos = BlockPos::new(18357644, 831, -20882616);
        let packed = pos.packed().unwrap();
        assert_eq!(packed.0, 0x4847861866C5B47F);

        let mut bytes = Vec::new();
        pos.encode(&mut bytes).unwrap();
        assert_eq!(bytes, 0x4847861866C5B47Fu64.to_be_bytes());

        let mut slice = bytes.as_slice();
        assert_eq!(BlockPos::decode(&mut slice).unwrap(), pos);
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(BlockPos::new(0, 2048, 0).packed().is_err());
        assert!(BlockPos::new(33554432, 0, 0).packed().is_err());
    }
}
