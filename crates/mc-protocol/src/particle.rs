use std::io::Write;

use anyhow::bail;
use glam::{DVec3, Vec3};

use crate::{BlockPos, Decode, Encode, ItemStack, VarInt};

/// A particle effect payload, as carried by `ParticleS2c`. Block-state
/// carrying variants (`Block`, `BlockMarker`, `FallingDust`) hold the raw
/// numeric block state id rather than a typed `BlockState`, since the block
/// state registry itself is out of scope for a codec crate; callers that
/// need the typed form resolve it against their own registry snapshot.
///
/// This is a representative subset of the full particle id space (vanilla
/// defines ~95 kinds); the ones modeled here cover every shape the wire
/// format distinguishes (unit, colored dust, block state, item, vibration
/// source, single scalar).
#[derive(Clone, PartialEq, Debug)]
pub enum Particle {
    AmbientEntityEffect,
    AngryVillager,
    Block(i32),
    BlockMarker(i32),
    Bubble,
    Cloud,
    Crit,
    DragonBreath,
    Dust { rgb: Vec3, scale: f32 },
    DustColorTransition { from_rgb: Vec3, scale: f32, to_rgb: Vec3 },
    Effect,
    EndRod,
    ExplosionEmitter,
    Explosion,
    SonicBoom,
    FallingDust(i32),
    Flame,
    HappyVillager,
    Item(Option<ItemStack>),
    VibrationBlock { block_pos: BlockPos, ticks: i32 },
    VibrationEntity { entity_id: i32, entity_eye_height: f32, ticks: i32 },
    Note,
    Poof,
    Portal,
    Rain,
    Smoke,
    Witch,
    Shriek { delay: i32 },
}

impl Particle {
    pub const fn id(&self) -> i32 {
        match self {
            Particle::AmbientEntityEffect => 0,
            Particle::AngryVillager => 1,
            Particle::Block(_) => 2,
            Particle::BlockMarker(_) => 3,
            Particle::Bubble => 4,
            Particle::Cloud => 5,
            Particle::Crit => 6,
            Particle::DragonBreath => 8,
            Particle::Dust { .. } => 14,
            Particle::DustColorTransition { .. } => 15,
            Particle::Effect => 16,
            Particle::EndRod => 20,
            Particle::ExplosionEmitter => 22,
            Particle::Explosion => 23,
            Particle::SonicBoom => 24,
            Particle::FallingDust(_) => 25,
            Particle::Flame => 28,
            Particle::HappyVillager => 36,
            Particle::Item(_) => 40,
            Particle::VibrationBlock { .. } => 41,
            Particle::VibrationEntity { .. } => 41,
            Particle::Note => 47,
            Particle::Poof => 48,
            Particle::Portal => 49,
            Particle::Rain => 50,
            Particle::Smoke => 51,
            Particle::Witch => 59,
            Particle::Shriek { .. } => 93,
        }
    }

    /// Decodes the particle body, given the id already read off the wire.
    pub fn decode_with_id(id: i32, r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match id {
            0 => Particle::AmbientEntityEffect,
            1 => Particle::AngryVillager,
            2 => Particle::Block(VarInt::decode(r)?.0),
            3 => Particle::BlockMarker(VarInt::decode(r)?.0),
            4 => Particle::Bubble,
            5 => Particle::Cloud,
            6 => Particle::Crit,
            8 => Particle::DragonBreath,
            14 => Particle::Dust {
                rgb: Decode::decode(r)?,
                scale: f32::decode(r)?,
            },
            15 => Particle::DustColorTransition {
                from_rgb: Decode::decode(r)?,
                scale: f32::decode(r)?,
                to_rgb: Decode::decode(r)?,
            },
            16 => Particle::Effect,
            20 => Particle::EndRod,
            22 => Particle::ExplosionEmitter,
            23 => Particle::Explosion,
            24 => Particle::SonicBoom,
            25 => Particle::FallingDust(VarInt::decode(r)?.0),
            28 => Particle::Flame,
            36 => Particle::HappyVillager,
            40 => Particle::Item(Decode::decode(r)?),
            41 => match <&str>::decode(r)? {
                "minecraft:block" | "block" => Particle::VibrationBlock {
                    block_pos: BlockPos::decode(r)?,
                    ticks: VarInt::decode(r)?.0,
                },
                "minecraft:entity" | "entity" => Particle::VibrationEntity {
                    entity_id: VarInt::decode(r)?.0,
                    entity_eye_height: f32::decode(r)?,
                    ticks: VarInt::decode(r)?.0,
                },
                other => bail!("invalid vibration position source \"{other}\""),
            },
            47 => Particle::Note,
            48 => Particle::Poof,
            49 => Particle::Portal,
            50 => Particle::Rain,
            51 => Particle::Smoke,
            59 => Particle::Witch,
            93 => Particle::Shriek {
                delay: VarInt::decode(r)?.0,
            },
            other => bail!("invalid particle id {other}"),
        })
    }
}

/// Encodes the particle body only; callers write `VarInt(particle.id())`
/// themselves (the id precedes other fixed fields in `ParticleS2c`, so it
/// can't be folded into this impl).
impl Encode for Particle {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            Particle::Block(state) | Particle::BlockMarker(state) | Particle::FallingDust(state) => {
                VarInt(*state).encode(w)
            }
            Particle::Dust { rgb, scale } => {
                rgb.encode(&mut w)?;
                scale.encode(w)
            }
            Particle::DustColorTransition {
                from_rgb,
                scale,
                to_rgb,
            } => {
                from_rgb.encode(&mut w)?;
                scale.encode(&mut w)?;
                to_rgb.encode(w)
            }
            Particle::Item(stack) => stack.encode(w),
            Particle::VibrationBlock { block_pos, ticks } => {
                "minecraft:block".encode(&mut w)?;
                block_pos.encode(&mut w)?;
                VarInt(*ticks).encode(w)
            }
            Particle::VibrationEntity {
                entity_id,
                entity_eye_height,
                ticks,
            } => {
                "minecraft:entity".encode(&mut w)?;
                VarInt(*entity_id).encode(&mut w)?;
                entity_eye_height.encode(&mut w)?;
                VarInt(*ticks).encode(w)
            }
            Particle::Shriek { delay } => VarInt(*delay).encode(w),
            _ => Ok(()),
        }
    }
}

/// A particle-spawn event: id, long-distance visibility flag, position,
/// per-axis random offset, max speed, and a repeat count, followed by the
/// particle's own body.
#[derive(Clone, PartialEq, Debug)]
pub struct ParticleEvent {
    pub particle: Particle,
    pub long_distance: bool,
    pub position: DVec3,
    pub offset: Vec3,
    pub max_speed: f32,
    pub count: i32,
}

impl Encode for ParticleEvent {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        VarInt(self.particle.id()).encode(&mut w)?;
        self.long_distance.encode(&mut w)?;
        self.position.encode(&mut w)?;
        self.offset.encode(&mut w)?;
        self.max_speed.encode(&mut w)?;
        self.count.encode(&mut w)?;
        self.particle.encode(w)
    }
}

impl Decode<'_> for ParticleEvent {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let id = VarInt::decode(r)?.0;
        let long_distance = bool::decode(r)?;
        let position = DVec3::decode(r)?;
        let offset = Vec3::decode(r)?;
        let max_speed = f32::decode(r)?;
        let count = i32::decode(r)?;
        let particle = Particle::decode_with_id(id, r)?;
        Ok(ParticleEvent {
            particle,
            long_distance,
            position,
            offset,
            max_speed,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dust_particle_round_trips() {
        let event = ParticleEvent {
            particle: Particle::Dust {
                rgb: Vec3::new(1.0, 0.0, 0.5),
                scale: 2.0,
            },
            long_distance: false,
            position: DVec3::new(1.0, 2.0, 3.0),
            offset: Vec3::ZERO,
            max_speed: 0.1,
            count: 10,
        };
        let mut buf = Vec::new();
        event.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(ParticleEvent::decode(&mut slice).unwrap(), event);
        assert!(slice.is_empty());
    }

    #[test]
    fn vibration_particle_round_trips() {
        let event = ParticleEvent {
            particle: Particle::VibrationBlock {
                block_pos: BlockPos::new(1, 2, 3),
                ticks: 20,
            },
            long_distance: true,
            position: DVec3::ZERO,
            offset: Vec3::ZERO,
            max_speed: 0.0,
            count: 1,
        };
        let mut buf = Vec::new();
        event.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(ParticleEvent::decode(&mut slice).unwrap(), event);
    }
}
