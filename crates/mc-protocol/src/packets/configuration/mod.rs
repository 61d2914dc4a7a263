use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Write;

use mc_ident::Ident;
use uuid::Uuid;

use crate::phase::Phase;
use crate::text::Text;
use crate::{Bounded, Decode, Encode, Packet, PacketSide, RawBytes, VarInt};

/// `{tag group ident: {tag ident: [entry ids]}}`, as carried by both
/// [`ConfigurationUpdateTagsS2c`] and `play::PlayUpdateTagsS2c`. The tags
/// packet is sent once in configuration and again in play with a different
/// opcode, so the two phases get distinct packet structs/opcodes sharing
/// this one body type rather than a single registered packet.
pub type RegistryMap = BTreeMap<Ident, BTreeMap<Ident, Vec<VarInt>>>;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ChatMode {
    Enabled,
    CommandsOnly,
    Hidden,
}

impl ChatMode {
    fn id(self) -> i32 {
        match self {
            ChatMode::Enabled => 0,
            ChatMode::CommandsOnly => 1,
            ChatMode::Hidden => 2,
        }
    }

    fn from_id(id: i32) -> anyhow::Result<Self> {
        match id {
            0 => Ok(ChatMode::Enabled),
            1 => Ok(ChatMode::CommandsOnly),
            2 => Ok(ChatMode::Hidden),
            other => anyhow::bail!("invalid chat mode {other}"),
        }
    }
}

impl Encode for ChatMode {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        VarInt(self.id()).encode(w)
    }
}

impl Decode<'_> for ChatMode {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        ChatMode::from_id(VarInt::decode(r)?.0)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MainArm {
    Left,
    Right,
}

impl Encode for MainArm {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        VarInt(matches!(self, MainArm::Right) as i32).encode(w)
    }
}

impl Decode<'_> for MainArm {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match VarInt::decode(r)?.0 {
            0 => MainArm::Left,
            1 => MainArm::Right,
            other => anyhow::bail!("invalid main arm {other}"),
        })
    }
}

/// Packed bitmask of which skin layers the client renders; each bit is an
/// independent toggle so no validation beyond the byte itself applies.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct DisplayedSkinParts(pub u8);

impl Encode for DisplayedSkinParts {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.0.encode(w)
    }
}

impl Decode<'_> for DisplayedSkinParts {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(DisplayedSkinParts(u8::decode(r)?))
    }
}

/// Serverbound, opcode 0x00. Sent once on entering CONFIGURATION (and
/// again after joining PLAY) to describe client-side display settings.
#[derive(Clone, PartialEq, Debug)]
pub struct ClientInformationC2s<'a> {
    pub locale: &'a str,
    pub view_distance: u8,
    pub chat_mode: ChatMode,
    pub chat_colors: bool,
    pub displayed_skin_parts: DisplayedSkinParts,
    pub main_arm: MainArm,
    pub enable_text_filtering: bool,
    pub allow_server_listings: bool,
}

impl Encode for ClientInformationC2s<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.locale.encode(&mut w)?;
        self.view_distance.encode(&mut w)?;
        self.chat_mode.encode(&mut w)?;
        self.chat_colors.encode(&mut w)?;
        self.displayed_skin_parts.encode(&mut w)?;
        self.main_arm.encode(&mut w)?;
        self.enable_text_filtering.encode(&mut w)?;
        self.allow_server_listings.encode(w)
    }
}

impl<'a> Decode<'a> for ClientInformationC2s<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            locale: <&str>::decode(r)?,
            view_distance: u8::decode(r)?,
            chat_mode: ChatMode::decode(r)?,
            chat_colors: bool::decode(r)?,
            displayed_skin_parts: DisplayedSkinParts::decode(r)?,
            main_arm: MainArm::decode(r)?,
            enable_text_filtering: bool::decode(r)?,
            allow_server_listings: bool::decode(r)?,
        })
    }
}

impl Packet for ClientInformationC2s<'_> {
    const OPCODE: i32 = 0x00;
    const PHASE: Phase = Phase::Configuration;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "ClientInformationC2s";
}

/// Serverbound and clientbound plugin-channel messages (opcode 0x01 and
/// 0x01 respectively), bounded to the 32767-byte CONFIGURATION-phase cap.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CustomPayloadC2s<'a> {
    pub channel: Ident,
    pub data: Bounded<RawBytes<'a>, 32767>,
}

impl Encode for CustomPayloadC2s<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.channel.encode(&mut w)?;
        self.data.encode(w)
    }
}

impl<'a> Decode<'a> for CustomPayloadC2s<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            channel: Ident::decode(r)?,
            data: Bounded::decode(r)?,
        })
    }
}

impl Packet for CustomPayloadC2s<'_> {
    const OPCODE: i32 = 0x01;
    const PHASE: Phase = Phase::Configuration;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "CustomPayloadC2s";
}

/// Clientbound, opcode 0x00. Disconnects during configuration with an NBT
/// reason (unlike the JSON-form login disconnect).
#[derive(Clone, PartialEq, Debug)]
pub struct ConfigurationDisconnectS2c<'a> {
    pub reason: Cow<'a, Text>,
}

impl Encode for ConfigurationDisconnectS2c<'_> {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.reason.encode(w)
    }
}

impl<'a> Decode<'a> for ConfigurationDisconnectS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            reason: Cow::Owned(Text::decode(r)?),
        })
    }
}

impl Packet for ConfigurationDisconnectS2c<'_> {
    const OPCODE: i32 = 0x02;
    const PHASE: Phase = Phase::Configuration;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "ConfigurationDisconnectS2c";
}

/// Serverbound, opcode 0x02. No payload; signals the client is ready for
/// PLAY. Paired with [`FinishConfigurationS2c`] to drive the
/// CONFIGURATION → PLAY transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct FinishConfigurationC2s;

impl Encode for FinishConfigurationC2s {
    fn encode(&self, _w: impl Write) -> anyhow::Result<()> {
        Ok(())
    }
}

impl Decode<'_> for FinishConfigurationC2s {
    fn decode(_r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(FinishConfigurationC2s)
    }
}

impl Packet for FinishConfigurationC2s {
    const OPCODE: i32 = 0x02;
    const PHASE: Phase = Phase::Configuration;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "FinishConfigurationC2s";
}

/// Clientbound, opcode 0x03. No payload; tells the client configuration is
/// done. The client should answer with [`FinishConfigurationC2s`], at
/// which point the driver applies [`crate::phase::Transition::ToPlay`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct FinishConfigurationS2c;

impl Encode for FinishConfigurationS2c {
    fn encode(&self, _w: impl Write) -> anyhow::Result<()> {
        Ok(())
    }
}

impl Decode<'_> for FinishConfigurationS2c {
    fn decode(_r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(FinishConfigurationS2c)
    }
}

impl Packet for FinishConfigurationS2c {
    const OPCODE: i32 = 0x03;
    const PHASE: Phase = Phase::Configuration;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "FinishConfigurationS2c";
}

/// Serverbound, opcode 0x04 / clientbound, opcode 0x04. An opaque
/// round-trip id used to detect a dead connection.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KeepAliveC2s(pub i64);

impl Encode for KeepAliveC2s {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.0.encode(w)
    }
}

impl Decode<'_> for KeepAliveC2s {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(KeepAliveC2s(i64::decode(r)?))
    }
}

impl Packet for KeepAliveC2s {
    const OPCODE: i32 = 0x04;
    const PHASE: Phase = Phase::Configuration;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "KeepAliveC2s";
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KeepAliveS2c(pub i64);

impl Encode for KeepAliveS2c {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.0.encode(w)
    }
}

impl Decode<'_> for KeepAliveS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(KeepAliveS2c(i64::decode(r)?))
    }
}

impl Packet for KeepAliveS2c {
    const OPCODE: i32 = 0x04;
    const PHASE: Phase = Phase::Configuration;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "KeepAliveS2c";
}

/// Clientbound, opcode 0x09. Offers an optional resource pack.
///
/// `hash` is validated opportunistically: a naive `len != 40 && is_hex`
/// check reads as inverted, so this constructor treats *either* a
/// non-hex character *or* a length other than 40 as invalid, downgrading
/// to `None` rather than failing the packet.
#[derive(Clone, PartialEq, Debug)]
pub struct ResourcePackPushS2c<'a> {
    pub uuid: Uuid,
    pub url: Bounded<&'a str, 32767>,
    pub hash: Option<&'a str>,
    pub forced: bool,
    pub prompt_message: Option<Cow<'a, Text>>,
}

impl<'a> ResourcePackPushS2c<'a> {
    #[must_use]
    pub fn new(
        uuid: Uuid,
        url: &'a str,
        hash: &'a str,
        forced: bool,
        prompt_message: Option<Cow<'a, Text>>,
    ) -> Self {
        let hash = (hash.len() == 40 && hash.bytes().all(|b| b.is_ascii_hexdigit())).then_some(hash);
        Self {
            uuid,
            url: Bounded(url),
            hash,
            forced,
            prompt_message,
        }
    }
}

impl Encode for ResourcePackPushS2c<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.uuid.encode(&mut w)?;
        self.url.encode(&mut w)?;
        self.hash.unwrap_or("").encode(&mut w)?;
        self.forced.encode(&mut w)?;
        self.prompt_message.encode(w)
    }
}

impl<'a> Decode<'a> for ResourcePackPushS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let uuid = Uuid::decode(r)?;
        let url = Bounded::<&str, 32767>::decode(r)?;
        let hash_raw = <&str>::decode(r)?;
        let forced = bool::decode(r)?;
        let prompt_message = Option::<Cow<'a, Text>>::decode(r)?;

        let hash =
            (hash_raw.len() == 40 && hash_raw.bytes().all(|b| b.is_ascii_hexdigit())).then_some(hash_raw);

        Ok(Self {
            uuid,
            url,
            hash,
            forced,
            prompt_message,
        })
    }
}

impl Packet for ResourcePackPushS2c<'_> {
    const OPCODE: i32 = 0x09;
    const PHASE: Phase = Phase::Configuration;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "ResourcePackPushS2c";
}

/// Serverbound, opcode 0x06. The client's verdict on a pushed resource
/// pack.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ResourcePackStatusC2s {
    SuccessfullyDownloaded,
    Declined,
    FailedDownload,
    Accepted,
}

impl ResourcePackStatusC2s {
    fn id(self) -> i32 {
        match self {
            ResourcePackStatusC2s::SuccessfullyDownloaded => 0,
            ResourcePackStatusC2s::Declined => 1,
            ResourcePackStatusC2s::FailedDownload => 2,
            ResourcePackStatusC2s::Accepted => 3,
        }
    }

    fn from_id(id: i32) -> anyhow::Result<Self> {
        match id {
            0 => Ok(ResourcePackStatusC2s::SuccessfullyDownloaded),
            1 => Ok(ResourcePackStatusC2s::Declined),
            2 => Ok(ResourcePackStatusC2s::FailedDownload),
            3 => Ok(ResourcePackStatusC2s::Accepted),
            other => anyhow::bail!("invalid resource pack status {other}"),
        }
    }
}

impl Encode for ResourcePackStatusC2s {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        VarInt(self.id()).encode(w)
    }
}

impl Decode<'_> for ResourcePackStatusC2s {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        ResourcePackStatusC2s::from_id(VarInt::decode(r)?.0)
    }
}

impl Packet for ResourcePackStatusC2s {
    const OPCODE: i32 = 0x06;
    const PHASE: Phase = Phase::Configuration;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "ResourcePackStatusC2s";
}

/// Clientbound, opcode 0x0C. `groups` maps tag-group identifiers (e.g.
/// `minecraft:block`) to `{tag: [entry ids]}`, per [`RegistryMap`].
#[derive(Clone, PartialEq, Debug)]
pub struct ConfigurationUpdateTagsS2c {
    pub groups: RegistryMap,
}

impl Encode for ConfigurationUpdateTagsS2c {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.groups.encode(w)
    }
}

impl Decode<'_> for ConfigurationUpdateTagsS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            groups: RegistryMap::decode(r)?,
        })
    }
}

impl Packet for ConfigurationUpdateTagsS2c {
    const OPCODE: i32 = 0x0C;
    const PHASE: Phase = Phase::Configuration;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "ConfigurationUpdateTagsS2c";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_information_round_trips() {
        let pkt = ClientInformationC2s {
            locale: "en_US",
            view_distance: 10,
            chat_mode: ChatMode::Enabled,
            chat_colors: true,
            displayed_skin_parts: DisplayedSkinParts(0x7F),
            main_arm: MainArm::Right,
            enable_text_filtering: false,
            allow_server_listings: true,
        };
        let mut buf = Vec::new();
        pkt.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(ClientInformationC2s::decode(&mut slice).unwrap(), pkt);
    }

    #[test]
    fn resource_pack_push_downgrades_bad_hash() {
        let pkt = ResourcePackPushS2c::new(Uuid::nil(), "https://example.com/pack.zip", "not-hex", false, None);
        assert_eq!(pkt.hash, None);

        let mut buf = Vec::new();
        pkt.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        let decoded = ResourcePackPushS2c::decode(&mut slice).unwrap();
        assert_eq!(decoded.hash, None);
    }

    #[test]
    fn resource_pack_push_keeps_valid_hash() {
        let hash = "a".repeat(40);
        let pkt = ResourcePackPushS2c::new(Uuid::nil(), "https://example.com/pack.zip", &hash, true, None);
        assert_eq!(pkt.hash, Some(hash.as_str()));
    }

    #[test]
    fn update_tags_round_trips() {
        let mut inner = BTreeMap::new();
        inner.insert(Ident::new("minecraft:wool").unwrap(), vec![VarInt(1), VarInt(2)]);
        let mut groups = RegistryMap::new();
        groups.insert(Ident::new("minecraft:block").unwrap(), inner);

        let pkt = ConfigurationUpdateTagsS2c { groups };
        let mut buf = Vec::new();
        pkt.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(ConfigurationUpdateTagsS2c::decode(&mut slice).unwrap(), pkt);
    }
}
