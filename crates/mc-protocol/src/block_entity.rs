use std::io::Write;

use mc_nbt::Compound;

use crate::{Decode, Encode, VarInt};

/// One block entity included in a chunk's initial data, or a standalone
/// update. `packed_xz` holds the block's position within its chunk column
/// as `(x & 0xF) << 4 | (z & 0xF)`.
#[derive(Clone, PartialEq, Debug)]
pub struct BlockEntity {
    pub packed_xz: u8,
    pub y: i16,
    pub kind: i32,
    pub data: Compound,
}

impl BlockEntity {
    #[must_use]
    pub fn new(section_x: u8, section_z: u8, y: i16, kind: i32, data: Compound) -> Self {
        Self {
            packed_xz: (section_x & 0xF) << 4 | (section_z & 0xF),
            y,
            kind,
            data,
        }
    }

    pub fn section_x(&self) -> u8 {
        self.packed_xz >> 4
    }

    pub fn section_z(&self) -> u8 {
        self.packed_xz & 0xF
    }
}

impl Encode for BlockEntity {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.packed_xz.encode(&mut w)?;
        self.y.encode(&mut w)?;
        VarInt(self.kind).encode(&mut w)?;
        self.data.encode(w)
    }
}

impl Decode<'_> for BlockEntity {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(BlockEntity {
            packed_xz: u8::decode(r)?,
            y: i16::decode(r)?,
            kind: VarInt::decode(r)?.0,
            data: Compound::decode(r)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_entity_round_trips() {
        let mut data = Compound::new();
        data.insert("Items", mc_nbt::Value::List(vec![]));
        let be = BlockEntity::new(3, 12, 64, 61, data);
        assert_eq!(be.section_x(), 3);
        assert_eq!(be.section_z(), 12);

        let mut buf = Vec::new();
        be.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(BlockEntity::decode(&mut slice).unwrap(), be);
    }
}
