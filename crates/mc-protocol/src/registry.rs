//! Per-phase, per-direction packet registries.
//!
//! Each `*Packet` enum here is this crate's opcode dispatch table for one
//! `(phase, direction)` pair: encoding prefixes the wire opcode and
//! delegates to the wrapped packet's own `Encode`; decoding reads the
//! opcode first and matches it to a variant before delegating to that
//! packet's `Decode`. There is no macro generating these — with ~120
//! opcodes in the full PLAY table this grows by one match arm per packet,
//! not by structural change.

use std::io::Write;

use anyhow::{bail, Context};

use crate::packets::{configuration, handshaking, login, play, status};
use crate::packets::configuration::*;
use crate::packets::handshaking::*;
use crate::packets::login::*;
use crate::packets::play::*;
use crate::packets::status::*;
use crate::phase::Phase;
use crate::{Decode, Encode, Packet, PacketSide, VarInt};

/// Writes `P::OPCODE` followed by `pkt`'s own encoding.
pub fn encode_packet<P: Packet>(pkt: &P, mut w: impl Write) -> anyhow::Result<()> {
    pkt.validate().context("packet failed validation before encoding")?;
    VarInt(P::OPCODE).encode(&mut w).context("failed to encode opcode")?;
    pkt.encode(w)
}

/// Reads an opcode, confirms it matches `P::OPCODE`, and decodes the rest
/// of `r` as `P`.
pub fn decode_packet<'a, P: Packet + Decode<'a>>(r: &mut &'a [u8]) -> anyhow::Result<P> {
    let opcode = VarInt::decode(r).context("failed to decode opcode")?.0;
    if opcode != P::OPCODE {
        bail!(
            "unexpected opcode {opcode:#04x} while decoding {} (expected {:#04x})",
            P::NAME,
            P::OPCODE
        );
    }
    let pkt = P::decode(r)?;
    pkt.validate().context("packet failed validation after decoding")?;
    Ok(pkt)
}

#[derive(Debug)]
pub enum HandshakeServerboundPacket<'a> {
    Handshake(HandshakeC2s<'a>),
}

impl<'a> HandshakeServerboundPacket<'a> {
    pub fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let opcode = VarInt::decode(r)?.0;
        match opcode {
            HandshakeC2s::OPCODE => Ok(Self::Handshake(HandshakeC2s::decode(r)?)),
            other => bail!("unknown Handshake serverbound opcode {other:#04x}"),
        }
    }
}

#[derive(Debug)]
pub enum StatusServerboundPacket {
    Request(StatusRequestC2s),
    Ping(PingRequestC2s),
}

impl StatusServerboundPacket {
    pub fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let opcode = VarInt::decode(r)?.0;
        match opcode {
            StatusRequestC2s::OPCODE => Ok(Self::Request(StatusRequestC2s::decode(r)?)),
            PingRequestC2s::OPCODE => Ok(Self::Ping(PingRequestC2s::decode(r)?)),
            other => bail!("unknown Status serverbound opcode {other:#04x}"),
        }
    }
}

#[derive(Debug)]
pub enum StatusClientboundPacket<'a> {
    Response(StatusResponseS2c<'a>),
    Pong(PongResponseS2c),
}

impl<'a> StatusClientboundPacket<'a> {
    pub fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let opcode = VarInt::decode(r)?.0;
        match opcode {
            StatusResponseS2c::OPCODE => Ok(Self::Response(StatusResponseS2c::decode(r)?)),
            PongResponseS2c::OPCODE => Ok(Self::Pong(PongResponseS2c::decode(r)?)),
            other => bail!("unknown Status clientbound opcode {other:#04x}"),
        }
    }
}

#[derive(Debug)]
pub enum LoginServerboundPacket<'a> {
    Start(LoginStartC2s<'a>),
    EncryptionResponse(LoginEncryptionResponseC2s<'a>),
    PluginResponse(LoginPluginResponseC2s<'a>),
    Acknowledged(LoginAcknowledgedC2s),
}

impl<'a> LoginServerboundPacket<'a> {
    pub fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let opcode = VarInt::decode(r)?.0;
        match opcode {
            LoginStartC2s::OPCODE => Ok(Self::Start(LoginStartC2s::decode(r)?)),
            LoginEncryptionResponseC2s::OPCODE => {
                Ok(Self::EncryptionResponse(LoginEncryptionResponseC2s::decode(r)?))
            }
            LoginPluginResponseC2s::OPCODE => Ok(Self::PluginResponse(LoginPluginResponseC2s::decode(r)?)),
            LoginAcknowledgedC2s::OPCODE => Ok(Self::Acknowledged(LoginAcknowledgedC2s::decode(r)?)),
            other => bail!("unknown Login serverbound opcode {other:#04x}"),
        }
    }
}

#[derive(Debug)]
pub enum LoginClientboundPacket<'a> {
    Disconnect(LoginDisconnectS2c<'a>),
    EncryptionRequest(LoginEncryptionRequestS2c<'a>),
    Success(LoginSuccessS2c<'a>),
    SetCompression(LoginSetCompressionS2c),
    PluginRequest(LoginPluginRequestS2c<'a>),
}

impl<'a> LoginClientboundPacket<'a> {
    pub fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let opcode = VarInt::decode(r)?.0;
        match opcode {
            LoginDisconnectS2c::OPCODE => Ok(Self::Disconnect(LoginDisconnectS2c::decode(r)?)),
            LoginEncryptionRequestS2c::OPCODE => {
                Ok(Self::EncryptionRequest(LoginEncryptionRequestS2c::decode(r)?))
            }
            LoginSuccessS2c::OPCODE => Ok(Self::Success(LoginSuccessS2c::decode(r)?)),
            LoginSetCompressionS2c::OPCODE => Ok(Self::SetCompression(LoginSetCompressionS2c::decode(r)?)),
            LoginPluginRequestS2c::OPCODE => Ok(Self::PluginRequest(LoginPluginRequestS2c::decode(r)?)),
            other => bail!("unknown Login clientbound opcode {other:#04x}"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigurationServerboundPacket<'a> {
    ClientInformation(ClientInformationC2s<'a>),
    CustomPayload(CustomPayloadC2s<'a>),
    FinishConfiguration(FinishConfigurationC2s),
    KeepAlive(configuration::KeepAliveC2s),
    ResourcePackStatus(ResourcePackStatusC2s),
}

impl<'a> ConfigurationServerboundPacket<'a> {
    pub fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let opcode = VarInt::decode(r)?.0;
        match opcode {
            ClientInformationC2s::OPCODE => Ok(Self::ClientInformation(ClientInformationC2s::decode(r)?)),
            CustomPayloadC2s::OPCODE => Ok(Self::CustomPayload(CustomPayloadC2s::decode(r)?)),
            FinishConfigurationC2s::OPCODE => Ok(Self::FinishConfiguration(FinishConfigurationC2s::decode(r)?)),
            <configuration::KeepAliveC2s as Packet>::OPCODE => {
                Ok(Self::KeepAlive(configuration::KeepAliveC2s::decode(r)?))
            }
            ResourcePackStatusC2s::OPCODE => Ok(Self::ResourcePackStatus(ResourcePackStatusC2s::decode(r)?)),
            other => bail!("unknown Configuration serverbound opcode {other:#04x}"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigurationClientboundPacket<'a> {
    Disconnect(ConfigurationDisconnectS2c<'a>),
    FinishConfiguration(FinishConfigurationS2c),
    KeepAlive(configuration::KeepAliveS2c),
    ResourcePackPush(ResourcePackPushS2c<'a>),
    UpdateTags(ConfigurationUpdateTagsS2c),
}

impl<'a> ConfigurationClientboundPacket<'a> {
    pub fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let opcode = VarInt::decode(r)?.0;
        match opcode {
            ConfigurationDisconnectS2c::OPCODE => Ok(Self::Disconnect(ConfigurationDisconnectS2c::decode(r)?)),
            FinishConfigurationS2c::OPCODE => Ok(Self::FinishConfiguration(FinishConfigurationS2c::decode(r)?)),
            <configuration::KeepAliveS2c as Packet>::OPCODE => {
                Ok(Self::KeepAlive(configuration::KeepAliveS2c::decode(r)?))
            }
            ResourcePackPushS2c::OPCODE => Ok(Self::ResourcePackPush(ResourcePackPushS2c::decode(r)?)),
            ConfigurationUpdateTagsS2c::OPCODE => Ok(Self::UpdateTags(ConfigurationUpdateTagsS2c::decode(r)?)),
            other => bail!("unknown Configuration clientbound opcode {other:#04x}"),
        }
    }
}

/// A representative slice of the PLAY serverbound table; extending this to
/// the full ~50-opcode set is adding match arms, not restructuring.
#[derive(Debug)]
pub enum PlayServerboundPacket<'a> {
    ChatMessage(ChatMessageC2s<'a>),
    KeepAlive(play::KeepAliveC2s),
    PositionLook(PositionLookC2s),
}

impl<'a> PlayServerboundPacket<'a> {
    pub fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let opcode = VarInt::decode(r)?.0;
        match opcode {
            ChatMessageC2s::OPCODE => Ok(Self::ChatMessage(ChatMessageC2s::decode(r)?)),
            <play::KeepAliveC2s as Packet>::OPCODE => Ok(Self::KeepAlive(play::KeepAliveC2s::decode(r)?)),
            PositionLookC2s::OPCODE => Ok(Self::PositionLook(PositionLookC2s::decode(r)?)),
            other => bail!("unknown Play serverbound opcode {other:#04x}"),
        }
    }
}

/// A representative slice of the PLAY clientbound table (~120 opcodes in
/// the full vanilla protocol); see `packets::play` for the full set of
/// packet structs this crate models.
#[derive(Debug)]
pub enum PlayClientboundPacket<'a> {
    BossEvent(BossEventS2c),
    Respawn(RespawnS2c),
    BlockEvent(BlockEventS2c),
    PlayerInfoUpdate(PlayerInfoUpdateS2c<'a>),
    ScoreboardObjectiveUpdate(ScoreboardObjectiveUpdateS2c<'a>),
    ScoreboardScoreUpdate(ScoreboardScoreUpdateS2c<'a>),
    ScoreboardScoreReset(ScoreboardScoreResetS2c<'a>),
    Particle(ParticleS2c),
    EntityTrackerUpdate(EntityTrackerUpdateS2c),
    UpdateTags(PlayUpdateTagsS2c),
    Commands(CommandsS2c<'a>),
    KeepAlive(play::KeepAliveS2c),
    Disconnect(PlayDisconnectS2c<'a>),
    EntitiesDestroy(EntitiesDestroyS2c),
    BlockUpdate(BlockUpdateS2c),
}

impl<'a> PlayClientboundPacket<'a> {
    pub fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let opcode = VarInt::decode(r)?.0;
        match opcode {
            BossEventS2c::OPCODE => Ok(Self::BossEvent(BossEventS2c::decode(r)?)),
            RespawnS2c::OPCODE => Ok(Self::Respawn(RespawnS2c::decode(r)?)),
            BlockEventS2c::OPCODE => Ok(Self::BlockEvent(BlockEventS2c::decode(r)?)),
            PlayerInfoUpdateS2c::OPCODE => Ok(Self::PlayerInfoUpdate(PlayerInfoUpdateS2c::decode(r)?)),
            ScoreboardObjectiveUpdateS2c::OPCODE => {
                Ok(Self::ScoreboardObjectiveUpdate(ScoreboardObjectiveUpdateS2c::decode(r)?))
            }
            ParticleS2c::OPCODE => Ok(Self::Particle(ParticleS2c::decode(r)?)),
            EntityTrackerUpdateS2c::OPCODE => Ok(Self::EntityTrackerUpdate(EntityTrackerUpdateS2c::decode(r)?)),
            PlayUpdateTagsS2c::OPCODE => Ok(Self::UpdateTags(PlayUpdateTagsS2c::decode(r)?)),
            CommandsS2c::OPCODE => Ok(Self::Commands(CommandsS2c::decode(r)?)),
            <play::KeepAliveS2c as Packet>::OPCODE => Ok(Self::KeepAlive(play::KeepAliveS2c::decode(r)?)),
            PlayDisconnectS2c::OPCODE => Ok(Self::Disconnect(PlayDisconnectS2c::decode(r)?)),
            EntitiesDestroyS2c::OPCODE => Ok(Self::EntitiesDestroy(EntitiesDestroyS2c::decode(r)?)),
            BlockUpdateS2c::OPCODE => Ok(Self::BlockUpdate(BlockUpdateS2c::decode(r)?)),
            ScoreboardScoreUpdateS2c::OPCODE => Ok(Self::ScoreboardScoreUpdate(ScoreboardScoreUpdateS2c::decode(r)?)),
            ScoreboardScoreResetS2c::OPCODE => Ok(Self::ScoreboardScoreReset(ScoreboardScoreResetS2c::decode(r)?)),
            other => bail!("unknown Play clientbound opcode {other:#04x}"),
        }
    }
}

/// Looks up whether `(phase, side, opcode)` is a registered combination.
/// Intended for diagnostics (`ProtocolError::Unregistered`), not as a hot
/// path — the `*Packet::decode` dispatchers above are the real registry.
pub fn is_registered(phase: Phase, side: PacketSide, opcode: i32) -> bool {
    use PacketSide::{Clientbound, Serverbound};

    matches!(
        (phase, side, opcode),
        (Phase::Handshake, Serverbound, 0x00)
            | (Phase::Status, Serverbound, 0x00 | 0x01)
            | (Phase::Status, Clientbound, 0x00 | 0x01)
            | (Phase::Login, Serverbound, 0x00..=0x03)
            | (Phase::Login, Clientbound, 0x00..=0x04)
            | (Phase::Configuration, Serverbound, 0x00 | 0x01 | 0x02 | 0x04 | 0x06)
            | (Phase::Configuration, Clientbound, 0x02 | 0x03 | 0x04 | 0x09 | 0x0C)
            | (Phase::Play, Serverbound, 0x05 | 0x12 | 0x1C)
            | (
                Phase::Play,
                Clientbound,
                0x09 | 0x0A | 0x0B | 0x11 | 0x1B | 0x1E | 0x23 | 0x24 | 0x3E | 0x41 | 0x42 | 0x52 | 0x56 | 0x59
                    | 0x6C
            )
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_request_and_ping_dispatch() {
        let mut buf = Vec::new();
        encode_packet(&PingRequestC2s { payload: 7 }, &mut buf).unwrap();

        let mut slice = buf.as_slice();
        match StatusServerboundPacket::decode(&mut slice).unwrap() {
            StatusServerboundPacket::Ping(p) => assert_eq!(p.payload, 7),
            other => panic!("expected Ping, got {other:?}"),
        }
    }

    #[test]
    fn unregistered_play_opcode_reports_false() {
        assert!(is_registered(Phase::Play, PacketSide::Clientbound, 0x0A));
        assert!(is_registered(Phase::Play, PacketSide::Clientbound, 0x3E));
        assert!(!is_registered(Phase::Play, PacketSide::Clientbound, 0x7F));
    }

    #[test]
    fn wrong_opcode_is_rejected_by_decode_packet() {
        let mut buf = Vec::new();
        VarInt(0x01).encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert!(decode_packet::<StatusRequestC2s>(&mut slice).is_err());
    }
}
