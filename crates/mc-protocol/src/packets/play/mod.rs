use std::borrow::Cow;
use std::io::Write;

use anyhow::{bail, ensure};
use mc_ident::Ident;
use tracing::warn;
use uuid::Uuid;

use crate::bitset::FixedBitSet;
use crate::entity_metadata::EntityMetadata;
use crate::packets::configuration::RegistryMap;
use crate::particle::ParticleEvent;
use crate::phase::Phase;
use crate::text::Text;
use crate::{BlockPos, Decode, Encode, Packet, PacketSide, Property, RawBytes, VarInt};

/// A player's game mode. `OptGameMode` below adds the "none of these"
/// sentinel several PLAY packets need.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GameMode {
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl GameMode {
    fn id(self) -> i8 {
        match self {
            GameMode::Survival => 0,
            GameMode::Creative => 1,
            GameMode::Adventure => 2,
            GameMode::Spectator => 3,
        }
    }

    fn from_id(id: i8) -> anyhow::Result<Self> {
        match id {
            0 => Ok(GameMode::Survival),
            1 => Ok(GameMode::Creative),
            2 => Ok(GameMode::Adventure),
            3 => Ok(GameMode::Spectator),
            other => bail!("invalid game mode {other}"),
        }
    }
}

impl Encode for GameMode {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.id().encode(w)
    }
}

impl Decode<'_> for GameMode {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        GameMode::from_id(i8::decode(r)?)
    }
}

/// An optional [`GameMode`], `None` encoded as `-1`. Used for
/// "previous game mode," which is absent until the player has changed
/// game mode at least once.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct OptGameMode(pub Option<GameMode>);

impl Encode for OptGameMode {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        match self.0 {
            Some(gm) => gm.id().encode(w),
            None => (-1i8).encode(w),
        }
    }
}

impl Decode<'_> for OptGameMode {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self(match i8::decode(r)? {
            -1 => None,
            other => Some(GameMode::from_id(other)?),
        }))
    }
}

/// A dimension name plus a block position within it, used for things like
/// the respawn anchor / last-death location.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GlobalPos {
    pub dimension_name: Ident,
    pub position: BlockPos,
}

impl Encode for GlobalPos {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.dimension_name.encode(&mut w)?;
        self.position.encode(w)
    }
}

impl Decode<'_> for GlobalPos {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            dimension_name: Ident::decode(r)?,
            position: BlockPos::decode(r)?,
        })
    }
}

/// Clientbound, opcode 0x0A. Adds, removes, or updates a boss bar. The
/// action discriminator gates which fields are present on the wire.
#[derive(Clone, PartialEq, Debug)]
pub struct BossEventS2c {
    pub id: Uuid,
    pub action: BossBarAction,
}

#[derive(Clone, PartialEq, Debug)]
pub enum BossBarAction {
    Add {
        title: Text,
        health: f32,
        color: BossBarColor,
        division: BossBarDivision,
        flags: BossBarFlags,
    },
    Remove,
    UpdateHealth(f32),
    UpdateTitle(Text),
    UpdateStyle(BossBarColor, BossBarDivision),
    UpdateFlags(BossBarFlags),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BossBarColor {
    Pink,
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    White,
}

impl BossBarColor {
    fn id(self) -> i32 {
        match self {
            BossBarColor::Pink => 0,
            BossBarColor::Blue => 1,
            BossBarColor::Red => 2,
            BossBarColor::Green => 3,
            BossBarColor::Yellow => 4,
            BossBarColor::Purple => 5,
            BossBarColor::White => 6,
        }
    }

    fn from_id(id: i32) -> anyhow::Result<Self> {
        Ok(match id {
            0 => BossBarColor::Pink,
            1 => BossBarColor::Blue,
            2 => BossBarColor::Red,
            3 => BossBarColor::Green,
            4 => BossBarColor::Yellow,
            5 => BossBarColor::Purple,
            6 => BossBarColor::White,
            other => bail!("invalid boss bar color {other}"),
        })
    }
}

impl Encode for BossBarColor {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        VarInt(self.id()).encode(w)
    }
}

impl Decode<'_> for BossBarColor {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        BossBarColor::from_id(VarInt::decode(r)?.0)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BossBarDivision {
    NoDivision,
    SixNotches,
    TenNotches,
    TwelveNotches,
    TwentyNotches,
}

impl BossBarDivision {
    fn id(self) -> i32 {
        match self {
            BossBarDivision::NoDivision => 0,
            BossBarDivision::SixNotches => 1,
            BossBarDivision::TenNotches => 2,
            BossBarDivision::TwelveNotches => 3,
            BossBarDivision::TwentyNotches => 4,
        }
    }

    fn from_id(id: i32) -> anyhow::Result<Self> {
        Ok(match id {
            0 => BossBarDivision::NoDivision,
            1 => BossBarDivision::SixNotches,
            2 => BossBarDivision::TenNotches,
            3 => BossBarDivision::TwelveNotches,
            4 => BossBarDivision::TwentyNotches,
            other => bail!("invalid boss bar division {other}"),
        })
    }
}

impl Encode for BossBarDivision {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        VarInt(self.id()).encode(w)
    }
}

impl Decode<'_> for BossBarDivision {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        BossBarDivision::from_id(VarInt::decode(r)?.0)
    }
}

/// `darken_sky | dragon_bar << 1 | create_fog << 2`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct BossBarFlags(pub u8);

impl BossBarFlags {
    pub fn darken_sky(self) -> bool {
        self.0 & 0b001 != 0
    }

    pub fn dragon_bar(self) -> bool {
        self.0 & 0b010 != 0
    }

    pub fn create_fog(self) -> bool {
        self.0 & 0b100 != 0
    }
}

impl Encode for BossBarFlags {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.0.encode(w)
    }
}

impl Decode<'_> for BossBarFlags {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(BossBarFlags(u8::decode(r)?))
    }
}

impl Encode for BossBarAction {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            BossBarAction::Add {
                title,
                health,
                color,
                division,
                flags,
            } => {
                VarInt(0).encode(&mut w)?;
                title.encode(&mut w)?;
                health.encode(&mut w)?;
                color.encode(&mut w)?;
                division.encode(&mut w)?;
                flags.encode(w)
            }
            BossBarAction::Remove => VarInt(1).encode(w),
            BossBarAction::UpdateHealth(health) => {
                VarInt(2).encode(&mut w)?;
                health.encode(w)
            }
            BossBarAction::UpdateTitle(title) => {
                VarInt(3).encode(&mut w)?;
                title.encode(w)
            }
            BossBarAction::UpdateStyle(color, division) => {
                VarInt(4).encode(&mut w)?;
                color.encode(&mut w)?;
                division.encode(w)
            }
            BossBarAction::UpdateFlags(flags) => {
                VarInt(5).encode(&mut w)?;
                flags.encode(w)
            }
        }
    }
}

impl Decode<'_> for BossBarAction {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match VarInt::decode(r)?.0 {
            0 => BossBarAction::Add {
                title: Text::decode(r)?,
                health: f32::decode(r)?,
                color: BossBarColor::decode(r)?,
                division: BossBarDivision::decode(r)?,
                flags: BossBarFlags::decode(r)?,
            },
            1 => BossBarAction::Remove,
            2 => BossBarAction::UpdateHealth(f32::decode(r)?),
            3 => BossBarAction::UpdateTitle(Text::decode(r)?),
            4 => BossBarAction::UpdateStyle(BossBarColor::decode(r)?, BossBarDivision::decode(r)?),
            5 => BossBarAction::UpdateFlags(BossBarFlags::decode(r)?),
            other => bail!("invalid boss bar action id {other}"),
        })
    }
}

impl Encode for BossEventS2c {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.id.encode(&mut w)?;
        self.action.encode(w)
    }
}

impl Decode<'_> for BossEventS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            id: Uuid::decode(r)?,
            action: BossBarAction::decode(r)?,
        })
    }
}

impl Packet for BossEventS2c {
    const OPCODE: i32 = 0x0A;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "BossEventS2c";

    fn validate(&self) -> anyhow::Result<()> {
        // `Add` carries every field by construction; nothing further to
        // check beyond what the type already enforces.
        Ok(())
    }
}

/// Clientbound, opcode 0x41. Moves the client to a new dimension, either
/// on login or after a bed/end-portal respawn.
#[derive(Clone, PartialEq, Debug)]
pub struct RespawnS2c {
    pub dimension_type: VarInt,
    pub dimension_name: Ident,
    pub hashed_seed: u64,
    pub game_mode: GameMode,
    pub previous_game_mode: OptGameMode,
    pub is_debug: bool,
    pub is_flat: bool,
    pub last_death_location: Option<GlobalPos>,
    pub portal_cooldown: VarInt,
    pub data_kept: DataKeptFlags,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct DataKeptFlags(pub u8);

impl DataKeptFlags {
    pub fn keep_attributes(self) -> bool {
        self.0 & 0b01 != 0
    }

    pub fn keep_metadata(self) -> bool {
        self.0 & 0b10 != 0
    }
}

impl Encode for DataKeptFlags {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.0.encode(w)
    }
}

impl Decode<'_> for DataKeptFlags {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(DataKeptFlags(u8::decode(r)?))
    }
}

impl Encode for RespawnS2c {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.dimension_type.encode(&mut w)?;
        self.dimension_name.encode(&mut w)?;
        self.hashed_seed.encode(&mut w)?;
        self.game_mode.encode(&mut w)?;
        self.previous_game_mode.encode(&mut w)?;
        self.is_debug.encode(&mut w)?;
        self.is_flat.encode(&mut w)?;
        self.last_death_location.encode(&mut w)?;
        self.portal_cooldown.encode(&mut w)?;
        self.data_kept.encode(w)
    }
}

impl Decode<'_> for RespawnS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            dimension_type: VarInt::decode(r)?,
            dimension_name: Ident::decode(r)?,
            hashed_seed: u64::decode(r)?,
            game_mode: GameMode::decode(r)?,
            previous_game_mode: OptGameMode::decode(r)?,
            is_debug: bool::decode(r)?,
            is_flat: bool::decode(r)?,
            last_death_location: Option::<GlobalPos>::decode(r)?,
            portal_cooldown: VarInt::decode(r)?,
            data_kept: DataKeptFlags::decode(r)?,
        })
    }
}

impl Packet for RespawnS2c {
    const OPCODE: i32 = 0x41;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "RespawnS2c";
}

/// Clientbound, opcode 0x0B. Triggers a block-specific animation (e.g. a
/// note block's sound, a chest's lid). The action-id/parameter pair uses
/// a u8 encoding rather than the varint form newer revisions use;
/// `block_type` similarly stays a raw registry id (`VarInt`) since the
/// `BlockKind` registry itself is out of this crate's generated-data
/// scope.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BlockEventS2c {
    pub position: BlockPos,
    pub action_id: u8,
    pub action_parameter: u8,
    pub block_type: VarInt,
}

impl Encode for BlockEventS2c {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.position.encode(&mut w)?;
        self.action_id.encode(&mut w)?;
        self.action_parameter.encode(&mut w)?;
        self.block_type.encode(w)
    }
}

impl Decode<'_> for BlockEventS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            position: BlockPos::decode(r)?,
            action_id: u8::decode(r)?,
            action_parameter: u8::decode(r)?,
            block_type: VarInt::decode(r)?,
        })
    }
}

impl Packet for BlockEventS2c {
    const OPCODE: i32 = 0x0B;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "BlockEventS2c";
}

/// Clientbound, opcode 0x3E. A bitmask of sub-actions (`actions`) applies
/// identically to every listed entry; `validate` enforces that the
/// per-entry optional fields agree with the bitmask (the repository's own
/// implicit invariant, made explicit here).
#[derive(Clone, PartialEq, Debug)]
pub struct PlayerInfoUpdateS2c<'a> {
    pub actions: PlayerInfoActions,
    pub entries: Vec<PlayerInfoEntry<'a>>,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct PlayerInfoActions(pub u8);

impl PlayerInfoActions {
    pub fn add_player(self) -> bool {
        self.0 & 0x01 != 0
    }

    pub fn initialize_chat(self) -> bool {
        self.0 & 0x02 != 0
    }

    pub fn update_game_mode(self) -> bool {
        self.0 & 0x04 != 0
    }

    pub fn update_listed(self) -> bool {
        self.0 & 0x08 != 0
    }

    pub fn update_latency(self) -> bool {
        self.0 & 0x10 != 0
    }

    pub fn update_display_name(self) -> bool {
        self.0 & 0x20 != 0
    }
}

impl Encode for PlayerInfoActions {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.0.encode(w)
    }
}

impl Decode<'_> for PlayerInfoActions {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(PlayerInfoActions(u8::decode(r)?))
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct PlayerInfoEntry<'a> {
    pub player_uuid: Uuid,
    pub username: &'a str,
    pub properties: Vec<Property<'a>>,
    pub chat_data: Option<ChatData<'a>>,
    pub listed: bool,
    pub ping: i32,
    pub game_mode: Option<GameMode>,
    pub display_name: Option<Cow<'a, Text>>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ChatData<'a> {
    pub session_id: Uuid,
    pub key_expiry_time: i64,
    pub public_key: &'a [u8],
    pub public_key_signature: &'a [u8],
}

impl Encode for ChatData<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.session_id.encode(&mut w)?;
        self.key_expiry_time.encode(&mut w)?;
        self.public_key.encode(&mut w)?;
        self.public_key_signature.encode(w)
    }
}

impl<'a> Decode<'a> for ChatData<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            session_id: Uuid::decode(r)?,
            key_expiry_time: i64::decode(r)?,
            public_key: <&[u8]>::decode(r)?,
            public_key_signature: <&[u8]>::decode(r)?,
        })
    }
}

impl Encode for PlayerInfoUpdateS2c<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.actions.encode(&mut w)?;
        VarInt(self.entries.len() as i32).encode(&mut w)?;

        for entry in &self.entries {
            entry.player_uuid.encode(&mut w)?;

            if self.actions.add_player() {
                entry.username.encode(&mut w)?;
                entry.properties.encode(&mut w)?;
            }
            if self.actions.initialize_chat() {
                entry.chat_data.encode(&mut w)?;
            }
            if self.actions.update_game_mode() {
                entry
                    .game_mode
                    .ok_or_else(|| anyhow::anyhow!("update_game_mode action set but entry has no game mode"))?
                    .encode(&mut w)?;
            }
            if self.actions.update_listed() {
                entry.listed.encode(&mut w)?;
            }
            if self.actions.update_latency() {
                VarInt(entry.ping).encode(&mut w)?;
            }
            if self.actions.update_display_name() {
                entry.display_name.encode(&mut w)?;
            }
        }

        Ok(())
    }
}

impl<'a> Decode<'a> for PlayerInfoUpdateS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let actions = PlayerInfoActions::decode(r)?;
        let count = VarInt::decode(r)?.0;
        ensure!(count >= 0, "negative player info entry count");

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let mut entry = PlayerInfoEntry {
                player_uuid: Uuid::decode(r)?,
                ..Default::default()
            };

            if actions.add_player() {
                entry.username = <&str>::decode(r)?;
                entry.properties = Vec::decode(r)?;
            }
            if actions.initialize_chat() {
                entry.chat_data = Option::decode(r)?;
            }
            if actions.update_game_mode() {
                entry.game_mode = Some(GameMode::decode(r)?);
            }
            if actions.update_listed() {
                entry.listed = bool::decode(r)?;
            }
            if actions.update_latency() {
                entry.ping = VarInt::decode(r)?.0;
            }
            if actions.update_display_name() {
                entry.display_name = Option::decode(r)?;
            }

            entries.push(entry);
        }

        Ok(Self { actions, entries })
    }
}

impl Packet for PlayerInfoUpdateS2c<'_> {
    const OPCODE: i32 = 0x3E;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "PlayerInfoUpdateS2c";

    fn validate(&self) -> anyhow::Result<()> {
        if self.actions.update_game_mode() {
            ensure!(
                self.entries.iter().all(|e| e.game_mode.is_some()),
                "update_game_mode action set but an entry is missing a game mode"
            );
        }
        Ok(())
    }
}

/// Clientbound, opcode 0x56. Creates, removes, or relabels a scoreboard
/// objective.
#[derive(Clone, PartialEq, Debug)]
pub struct ScoreboardObjectiveUpdateS2c<'a> {
    pub objective_name: &'a str,
    pub mode: ObjectiveMode<'a>,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ObjectiveMode<'a> {
    Create {
        display_name: Cow<'a, Text>,
        render_type: ObjectiveRenderType,
    },
    Remove,
    Update {
        display_name: Cow<'a, Text>,
        render_type: ObjectiveRenderType,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ObjectiveRenderType {
    #[default]
    Integer,
    Hearts,
}

impl Encode for ObjectiveRenderType {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        VarInt(matches!(self, ObjectiveRenderType::Hearts) as i32).encode(w)
    }
}

impl Decode<'_> for ObjectiveRenderType {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match VarInt::decode(r)?.0 {
            0 => ObjectiveRenderType::Integer,
            1 => ObjectiveRenderType::Hearts,
            other => bail!("invalid objective render type {other}"),
        })
    }
}

impl Encode for ObjectiveMode<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            ObjectiveMode::Create {
                display_name,
                render_type,
            } => {
                VarInt(0).encode(&mut w)?;
                display_name.encode(&mut w)?;
                render_type.encode(w)
            }
            ObjectiveMode::Remove => VarInt(1).encode(w),
            ObjectiveMode::Update {
                display_name,
                render_type,
            } => {
                VarInt(2).encode(&mut w)?;
                display_name.encode(&mut w)?;
                render_type.encode(w)
            }
        }
    }
}

impl<'a> Decode<'a> for ObjectiveMode<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(match VarInt::decode(r)?.0 {
            0 => ObjectiveMode::Create {
                display_name: Cow::Owned(Text::decode(r)?),
                render_type: ObjectiveRenderType::decode(r)?,
            },
            1 => ObjectiveMode::Remove,
            2 => ObjectiveMode::Update {
                display_name: Cow::Owned(Text::decode(r)?),
                render_type: ObjectiveRenderType::decode(r)?,
            },
            other => bail!("invalid objective mode {other}"),
        })
    }
}

impl Encode for ScoreboardObjectiveUpdateS2c<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.objective_name.encode(&mut w)?;
        self.mode.encode(w)
    }
}

impl<'a> Decode<'a> for ScoreboardObjectiveUpdateS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            objective_name: <&str>::decode(r)?,
            mode: ObjectiveMode::decode(r)?,
        })
    }
}

impl Packet for ScoreboardObjectiveUpdateS2c<'_> {
    const OPCODE: i32 = 0x56;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "ScoreboardObjectiveUpdateS2c";
}

/// Clientbound, opcode 0x59. Sets or removes one entity-name's score on
/// one objective; `mode` gates the presence of the trailing score value.
#[derive(Clone, PartialEq, Debug)]
pub struct ScoreboardScoreUpdateS2c<'a> {
    pub entity_name: &'a str,
    pub action: ScoreboardScoreUpdateAction<'a>,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ScoreboardScoreUpdateAction<'a> {
    Update {
        objective_name: &'a str,
        objective_score: VarInt,
    },
    Remove {
        objective_name: &'a str,
    },
}

impl Encode for ScoreboardScoreUpdateAction<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            ScoreboardScoreUpdateAction::Update {
                objective_name,
                objective_score,
            } => {
                VarInt(0).encode(&mut w)?;
                objective_name.encode(&mut w)?;
                objective_score.encode(w)
            }
            ScoreboardScoreUpdateAction::Remove { objective_name } => {
                VarInt(1).encode(&mut w)?;
                objective_name.encode(w)
            }
        }
    }
}

impl<'a> Decode<'a> for ScoreboardScoreUpdateAction<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(match VarInt::decode(r)?.0 {
            0 => ScoreboardScoreUpdateAction::Update {
                objective_name: <&str>::decode(r)?,
                objective_score: VarInt::decode(r)?,
            },
            1 => ScoreboardScoreUpdateAction::Remove {
                objective_name: <&str>::decode(r)?,
            },
            other => bail!("invalid scoreboard score update mode {other}"),
        })
    }
}

impl Encode for ScoreboardScoreUpdateS2c<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.entity_name.encode(&mut w)?;
        self.action.encode(w)
    }
}

impl<'a> Decode<'a> for ScoreboardScoreUpdateS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            entity_name: <&str>::decode(r)?,
            action: ScoreboardScoreUpdateAction::decode(r)?,
        })
    }
}

impl Packet for ScoreboardScoreUpdateS2c<'_> {
    const OPCODE: i32 = 0x59;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "ScoreboardScoreUpdateS2c";
}

/// Clientbound, opcode 0x1E. Resets one (or, if `objective_name` is
/// absent, every) objective's score for an entity name.
#[derive(Clone, PartialEq, Debug)]
pub struct ScoreboardScoreResetS2c<'a> {
    pub entity_name: &'a str,
    pub objective_name: Option<&'a str>,
}

impl Encode for ScoreboardScoreResetS2c<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.entity_name.encode(&mut w)?;
        self.objective_name.encode(w)
    }
}

impl<'a> Decode<'a> for ScoreboardScoreResetS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            entity_name: <&str>::decode(r)?,
            objective_name: Option::decode(r)?,
        })
    }
}

impl Packet for ScoreboardScoreResetS2c<'_> {
    const OPCODE: i32 = 0x1E;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "ScoreboardScoreResetS2c";
}

/// Clientbound, opcode 0x23. One particle effect, wrapping
/// [`ParticleEvent`] with the opcode/frame plumbing.
#[derive(Clone, PartialEq, Debug)]
pub struct ParticleS2c {
    pub event: ParticleEvent,
}

impl Encode for ParticleS2c {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.event.encode(w)
    }
}

impl Decode<'_> for ParticleS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            event: ParticleEvent::decode(r)?,
        })
    }
}

impl Packet for ParticleS2c {
    const OPCODE: i32 = 0x23;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "ParticleS2c";
}

/// Clientbound, opcode 0x52. Updates one entity's tracked-data fields.
#[derive(Clone, PartialEq, Debug)]
pub struct EntityTrackerUpdateS2c {
    pub entity_id: VarInt,
    pub metadata: EntityMetadata,
}

impl Encode for EntityTrackerUpdateS2c {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.entity_id.encode(&mut w)?;
        self.metadata.encode(w)
    }
}

impl Decode<'_> for EntityTrackerUpdateS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            entity_id: VarInt::decode(r)?,
            metadata: EntityMetadata::decode(r)?,
        })
    }
}

impl Packet for EntityTrackerUpdateS2c {
    const OPCODE: i32 = 0x52;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "EntityTrackerUpdateS2c";
}

/// Clientbound, opcode 0x6C. Same body shape as
/// `configuration::ConfigurationUpdateTagsS2c`; kept as its own registered
/// packet rather than reusing one struct across phases, since the two are
/// sent at different points in the session with different opcodes.
#[derive(Clone, PartialEq, Debug)]
pub struct PlayUpdateTagsS2c {
    pub groups: RegistryMap,
}

impl Encode for PlayUpdateTagsS2c {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.groups.encode(w)
    }
}

impl Decode<'_> for PlayUpdateTagsS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            groups: RegistryMap::decode(r)?,
        })
    }
}

impl Packet for PlayUpdateTagsS2c {
    const OPCODE: i32 = 0x6C;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "PlayUpdateTagsS2c";
}

/// Serverbound, opcode 0x05. A chat message with its signature data.
///
/// `signature` is a fixed 256-byte array gated by a leading boolean (no
/// separate length prefix), rather than a separately length-prefixed
/// byte string.
#[derive(Clone, PartialEq, Debug)]
pub struct ChatMessageC2s<'a> {
    pub message: crate::Bounded<&'a str, 256>,
    pub timestamp: u64,
    pub salt: u64,
    pub signature: Option<&'a [u8; 256]>,
    pub message_count: VarInt,
    pub acknowledgement: FixedBitSet<20, 3>,
}

impl Encode for ChatMessageC2s<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.message.encode(&mut w)?;
        self.timestamp.encode(&mut w)?;
        self.salt.encode(&mut w)?;
        self.signature.encode(&mut w)?;
        self.message_count.encode(&mut w)?;
        self.acknowledgement.encode(w)
    }
}

impl<'a> Decode<'a> for ChatMessageC2s<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            message: crate::Bounded::decode(r)?,
            timestamp: u64::decode(r)?,
            salt: u64::decode(r)?,
            signature: Option::<&[u8; 256]>::decode(r)?,
            message_count: VarInt::decode(r)?,
            acknowledgement: FixedBitSet::decode(r)?,
        })
    }
}

impl Packet for ChatMessageC2s<'_> {
    const OPCODE: i32 = 0x05;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "ChatMessageC2s";
}

/// Clientbound, opcode 0x11. The command graph sent on join. Left
/// structurally opaque: a full implementation would need the whole
/// brigadier-style parser-argument type zoo for a packet this crate never
/// needs to interpret, only relay.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommandsS2c<'a> {
    pub graph: RawBytes<'a>,
}

impl Encode for CommandsS2c<'_> {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.graph.encode(w)
    }
}

impl<'a> Decode<'a> for CommandsS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        warn!("decoding Commands graph as an opaque blob; structure is not modeled");
        Ok(Self {
            graph: RawBytes::decode(r)?,
        })
    }
}

impl Packet for CommandsS2c<'_> {
    const OPCODE: i32 = 0x11;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "CommandsS2c";
}

/// Serverbound and clientbound, opcode 0x12 / 0x24. An opaque round-trip
/// id; the PLAY-phase counterpart of the CONFIGURATION keep-alive pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KeepAliveC2s(pub u64);

impl Encode for KeepAliveC2s {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.0.encode(w)
    }
}

impl Decode<'_> for KeepAliveC2s {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(KeepAliveC2s(u64::decode(r)?))
    }
}

impl Packet for KeepAliveC2s {
    const OPCODE: i32 = 0x12;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "KeepAliveC2s";
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KeepAliveS2c(pub u64);

impl Encode for KeepAliveS2c {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.0.encode(w)
    }
}

impl Decode<'_> for KeepAliveS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(KeepAliveS2c(u64::decode(r)?))
    }
}

impl Packet for KeepAliveS2c {
    const OPCODE: i32 = 0x24;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "KeepAliveS2c";
}

/// Clientbound, opcode 0x1B. Ends the connection with a reason shown on a
/// disconnect screen.
#[derive(Clone, PartialEq, Debug)]
pub struct PlayDisconnectS2c<'a> {
    pub reason: Cow<'a, Text>,
}

impl Encode for PlayDisconnectS2c<'_> {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.reason.encode(w)
    }
}

impl<'a> Decode<'a> for PlayDisconnectS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            reason: Cow::Owned(Text::decode(r)?),
        })
    }
}

impl Packet for PlayDisconnectS2c<'_> {
    const OPCODE: i32 = 0x1B;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "PlayDisconnectS2c";
}

/// Clientbound, opcode 0x42. Despawns entities by id.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EntitiesDestroyS2c {
    pub entity_ids: Vec<VarInt>,
}

impl Encode for EntitiesDestroyS2c {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.entity_ids.encode(w)
    }
}

impl Decode<'_> for EntitiesDestroyS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            entity_ids: Vec::decode(r)?,
        })
    }
}

impl Packet for EntitiesDestroyS2c {
    const OPCODE: i32 = 0x42;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "EntitiesDestroyS2c";
}

/// Serverbound, opcode 0x1C. Reports the client's absolute position,
/// orientation, and ground contact every tick.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PositionLookC2s {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

impl Encode for PositionLookC2s {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.x.encode(&mut w)?;
        self.y.encode(&mut w)?;
        self.z.encode(&mut w)?;
        self.yaw.encode(&mut w)?;
        self.pitch.encode(&mut w)?;
        self.on_ground.encode(w)
    }
}

impl Decode<'_> for PositionLookC2s {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            x: f64::decode(r)?,
            y: f64::decode(r)?,
            z: f64::decode(r)?,
            yaw: f32::decode(r)?,
            pitch: f32::decode(r)?,
            on_ground: bool::decode(r)?,
        })
    }
}

impl Packet for PositionLookC2s {
    const OPCODE: i32 = 0x1C;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "PositionLookC2s";
}

/// Clientbound, opcode 0x09. A single block changed to `block_id` (raw
/// registry id, see the `BlockEventS2c` doc comment above for why this
/// crate doesn't model `BlockState` as its own type).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BlockUpdateS2c {
    pub position: BlockPos,
    pub block_id: VarInt,
}

impl Encode for BlockUpdateS2c {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.position.encode(&mut w)?;
        self.block_id.encode(w)
    }
}

impl Decode<'_> for BlockUpdateS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            position: BlockPos::decode(r)?,
            block_id: VarInt::decode(r)?,
        })
    }
}

impl Packet for BlockUpdateS2c {
    const OPCODE: i32 = 0x09;
    const PHASE: Phase = Phase::Play;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "BlockUpdateS2c";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boss_bar_add_requires_all_fields_e6() {
        let pkt = BossEventS2c {
            id: Uuid::nil(),
            action: BossBarAction::Add {
                title: Text::plain("Wither"),
                health: 1.0,
                color: BossBarColor::White,
                division: BossBarDivision::NoDivision,
                flags: BossBarFlags::default(),
            },
        };
        let mut buf = Vec::new();
        pkt.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        let decoded = BossEventS2c::decode(&mut slice).unwrap();
        decoded.validate().unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn boss_bar_update_health_carries_only_health_e6() {
        let pkt = BossEventS2c {
            id: Uuid::nil(),
            action: BossBarAction::UpdateHealth(0.5),
        };
        let mut buf = Vec::new();
        pkt.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        let decoded = BossEventS2c::decode(&mut slice).unwrap();
        decoded.validate().unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn player_info_update_rejects_missing_game_mode() {
        let pkt = PlayerInfoUpdateS2c {
            actions: PlayerInfoActions(0x04),
            entries: vec![PlayerInfoEntry {
                player_uuid: Uuid::nil(),
                game_mode: None,
                ..Default::default()
            }],
        };
        assert!(pkt.validate().is_err());
    }

    #[test]
    fn respawn_round_trips_without_death_location() {
        let pkt = RespawnS2c {
            dimension_type: VarInt(0),
            dimension_name: Ident::new("minecraft:overworld").unwrap(),
            hashed_seed: 42,
            game_mode: GameMode::Survival,
            previous_game_mode: OptGameMode(None),
            is_debug: false,
            is_flat: false,
            last_death_location: None,
            portal_cooldown: VarInt(0),
            data_kept: DataKeptFlags(0),
        };
        let mut buf = Vec::new();
        pkt.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(RespawnS2c::decode(&mut slice).unwrap(), pkt);
    }

    #[test]
    fn scoreboard_update_and_reset_round_trip() {
        let update = ScoreboardScoreUpdateS2c {
            entity_name: "Notch",
            action: ScoreboardScoreUpdateAction::Update {
                objective_name: "kills",
                objective_score: VarInt(5),
            },
        };
        let mut buf = Vec::new();
        update.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(ScoreboardScoreUpdateS2c::decode(&mut slice).unwrap(), update);

        let reset = ScoreboardScoreResetS2c {
            entity_name: "Notch",
            objective_name: None,
        };
        let mut buf = Vec::new();
        reset.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(ScoreboardScoreResetS2c::decode(&mut slice).unwrap(), reset);
    }

    #[test]
    fn commands_graph_round_trips_as_raw_bytes() {
        let bytes = [1u8, 2, 3, 4, 5];
        let pkt = CommandsS2c {
            graph: RawBytes(&bytes),
        };
        let mut buf = Vec::new();
        pkt.encode(&mut buf).unwrap();
        assert_eq!(buf, bytes);

        let mut slice = buf.as_slice();
        let decoded = CommandsS2c::decode(&mut slice).unwrap();
        assert_eq!(decoded.graph.0, &bytes);
    }

    #[test]
    fn chat_message_with_signature_round_trips() {
        let signature = [7u8; 256];
        let pkt = ChatMessageC2s {
            message: crate::Bounded("hello"),
            timestamp: 1,
            salt: 2,
            signature: Some(&signature),
            message_count: VarInt(0),
            acknowledgement: FixedBitSet::default(),
        };
        let mut buf = Vec::new();
        pkt.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        let decoded = ChatMessageC2s::decode(&mut slice).unwrap();
        assert_eq!(decoded.message.0, "hello");
        assert_eq!(decoded.signature, Some(&signature));
    }
}
