use std::io::Write;

use anyhow::bail;
use glam::Vec3;
use mc_nbt::Compound;
use uuid::Uuid;

use crate::particle::Particle;
use crate::text::Text;
use crate::{BlockPos, Decode, Encode, ItemStack, VarInt};

/// One typed tracked-data value. The discriminator (`MetadataValue::type_id`)
/// is written to the wire before the value itself; this is a representative
/// subset of the full vanilla type table, covering every shape entity
/// metadata actually takes (scalar, string, optional-component, slot,
/// position, rotation, nested particle).
#[derive(Clone, PartialEq, Debug)]
pub enum MetadataValue {
    Byte(i8),
    VarInt(i32),
    Float(f32),
    String(String),
    Text(Text),
    OptText(Option<Text>),
    Slot(Option<ItemStack>),
    Boolean(bool),
    Rotation(Vec3),
    Position(BlockPos),
    OptPosition(Option<BlockPos>),
    OptUuid(Option<Uuid>),
    BlockState(i32),
    Nbt(Compound),
    Particle(Particle),
    Pose(i32),
}

impl MetadataValue {
    const fn type_id(&self) -> i32 {
        match self {
            MetadataValue::Byte(_) => 0,
            MetadataValue::VarInt(_) => 1,
            MetadataValue::Float(_) => 3,
            MetadataValue::String(_) => 4,
            MetadataValue::Text(_) => 5,
            MetadataValue::OptText(_) => 6,
            MetadataValue::Slot(_) => 7,
            MetadataValue::Boolean(_) => 8,
            MetadataValue::Rotation(_) => 9,
            MetadataValue::Position(_) => 10,
            MetadataValue::OptPosition(_) => 11,
            MetadataValue::OptUuid(_) => 13,
            MetadataValue::BlockState(_) => 14,
            MetadataValue::Nbt(_) => 16,
            MetadataValue::Particle(_) => 17,
            MetadataValue::Pose(_) => 21,
        }
    }

    fn decode_with_type(type_id: i32, r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match type_id {
            0 => MetadataValue::Byte(i8::decode(r)?),
            1 => MetadataValue::VarInt(VarInt::decode(r)?.0),
            3 => MetadataValue::Float(f32::decode(r)?),
            4 => MetadataValue::String(<&str>::decode(r)?.to_owned()),
            5 => MetadataValue::Text(Text::decode(r)?),
            6 => MetadataValue::OptText(Option::<Text>::decode(r)?),
            7 => MetadataValue::Slot(Decode::decode(r)?),
            8 => MetadataValue::Boolean(bool::decode(r)?),
            9 => MetadataValue::Rotation(Vec3::decode(r)?),
            10 => MetadataValue::Position(BlockPos::decode(r)?),
            11 => MetadataValue::OptPosition(if bool::decode(r)? {
                Some(BlockPos::decode(r)?)
            } else {
                None
            }),
            13 => MetadataValue::OptUuid(if bool::decode(r)? {
                Some(Uuid::decode(r)?)
            } else {
                None
            }),
            14 => MetadataValue::BlockState(VarInt::decode(r)?.0),
            16 => MetadataValue::Nbt(Compound::decode(r)?),
            17 => {
                let id = VarInt::decode(r)?.0;
                MetadataValue::Particle(Particle::decode_with_id(id, r)?)
            }
            21 => MetadataValue::Pose(VarInt::decode(r)?.0),
            other => bail!("unsupported entity metadata type id {other}"),
        })
    }
}

impl Encode for MetadataValue {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            MetadataValue::Byte(v) => v.encode(w),
            MetadataValue::VarInt(v) => VarInt(*v).encode(w),
            MetadataValue::Float(v) => v.encode(w),
            MetadataValue::String(v) => v.as_str().encode(w),
            MetadataValue::Text(v) => v.encode(w),
            MetadataValue::OptText(v) => v.encode(w),
            MetadataValue::Slot(v) => v.encode(w),
            MetadataValue::Boolean(v) => v.encode(w),
            MetadataValue::Rotation(v) => v.encode(w),
            MetadataValue::Position(v) => v.encode(w),
            MetadataValue::OptPosition(v) => match v {
                None => false.encode(w),
                Some(pos) => {
                    true.encode(&mut w)?;
                    pos.encode(w)
                }
            },
            MetadataValue::OptUuid(v) => match v {
                None => false.encode(w),
                Some(uuid) => {
                    true.encode(&mut w)?;
                    uuid.encode(w)
                }
            },
            MetadataValue::BlockState(v) => VarInt(*v).encode(w),
            MetadataValue::Nbt(v) => v.encode(w),
            MetadataValue::Particle(v) => {
                VarInt(v.id()).encode(&mut w)?;
                v.encode(w)
            }
            MetadataValue::Pose(v) => VarInt(*v).encode(w),
        }
    }
}

/// The full `(index, type, value)*` stream for one entity, as carried by
/// `EntityTrackerUpdateS2c`. Terminated on the wire by a single `0xFF`
/// index byte with no following type/value.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct EntityMetadata {
    pub entries: Vec<(u8, MetadataValue)>,
}

const TERMINATOR: u8 = 0xFF;

impl Encode for EntityMetadata {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        for (index, value) in &self.entries {
            debug_assert_ne!(*index, TERMINATOR, "0xFF is reserved for the terminator");
            index.encode(&mut w)?;
            VarInt(value.type_id()).encode(&mut w)?;
            value.encode(&mut w)?;
        }
        TERMINATOR.encode(w)
    }
}

impl Decode<'_> for EntityMetadata {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let mut entries = Vec::new();
        loop {
            let index = u8::decode(r)?;
            if index == TERMINATOR {
                break;
            }
            let type_id = VarInt::decode(r)?.0;
            let value = MetadataValue::decode_with_type(type_id, r)?;
            entries.push((index, value));
        }
        Ok(EntityMetadata { entries })
    }
}

/// Index, wire type, and human-readable name for one tracked-data slot in
/// an entity's metadata schema. Schemas are built by concatenating the
/// field lists of conceptual ancestors rather than by inheritance, per the
/// composition-based redesign: `PLAYER_METADATA_FIELDS` below is
/// `BASE_ENTITY_METADATA_FIELDS ++ LIVING_ENTITY_METADATA_FIELDS ++ [player
/// fields]`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct MetadataFieldSchema {
    pub index: u8,
    pub type_id: i32,
    pub name: &'static str,
}

pub const BASE_ENTITY_METADATA_FIELDS: &[MetadataFieldSchema] = &[
    MetadataFieldSchema {
        index: 0,
        type_id: 0,
        name: "flags",
    },
    MetadataFieldSchema {
        index: 1,
        type_id: 1,
        name: "air_ticks",
    },
    MetadataFieldSchema {
        index: 2,
        type_id: 6,
        name: "custom_name",
    },
    MetadataFieldSchema {
        index: 3,
        type_id: 8,
        name: "custom_name_visible",
    },
    MetadataFieldSchema {
        index: 4,
        type_id: 8,
        name: "silent",
    },
    MetadataFieldSchema {
        index: 5,
        type_id: 8,
        name: "no_gravity",
    },
    MetadataFieldSchema {
        index: 6,
        type_id: 21,
        name: "pose",
    },
];

pub const LIVING_ENTITY_METADATA_FIELDS: &[MetadataFieldSchema] = &[
    MetadataFieldSchema {
        index: 7,
        type_id: 0,
        name: "hand_active_flags",
    },
    MetadataFieldSchema {
        index: 8,
        type_id: 1,
        name: "health",
    },
];

pub const PLAYER_METADATA_FIELD: MetadataFieldSchema = MetadataFieldSchema {
    index: 9,
    type_id: 3,
    name: "absorption",
};

/// `concat(BASE_ENTITY_METADATA_FIELDS, LIVING_ENTITY_METADATA_FIELDS,
/// [PLAYER_METADATA_FIELD])`, built once at module init rather than at
/// every call site.
pub fn player_metadata_schema() -> Vec<MetadataFieldSchema> {
    BASE_ENTITY_METADATA_FIELDS
        .iter()
        .chain(LIVING_ENTITY_METADATA_FIELDS)
        .copied()
        .chain(std::iter::once(PLAYER_METADATA_FIELD))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_stream_round_trips() {
        let metadata = EntityMetadata {
            entries: vec![
                (0, MetadataValue::Byte(0x20)),
                (8, MetadataValue::VarInt(20)),
                (2, MetadataValue::OptText(Some(Text::plain("Notch")))),
            ],
        };
        let mut buf = Vec::new();
        metadata.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(EntityMetadata::decode(&mut slice).unwrap(), metadata);
        assert!(slice.is_empty());
    }

    #[test]
    fn empty_metadata_is_just_terminator() {
        let metadata = EntityMetadata::default();
        let mut buf = Vec::new();
        metadata.encode(&mut buf).unwrap();
        assert_eq!(buf, vec![0xFF]);
    }

    #[test]
    fn player_schema_concatenates_ancestor_fields() {
        let schema = player_metadata_schema();
        assert_eq!(schema.len(), 10);
        assert_eq!(schema.last().unwrap().name, "absorption");
    }
}
