use std::borrow::Cow;
use std::io::Write;

use uuid::Uuid;

use crate::phase::Phase;
use crate::text::Text;
use crate::{Bounded, Decode, Encode, Packet, PacketSide, Property, RawBytes, VarInt};

/// Serverbound, opcode 0x00. Begins the login process.
#[derive(Clone, PartialEq, Debug)]
pub struct LoginStartC2s<'a> {
    pub name: Bounded<&'a str, 16>,
    pub player_uuid: Uuid,
}

impl Encode for LoginStartC2s<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.name.encode(&mut w)?;
        self.player_uuid.encode(w)
    }
}

impl<'a> Decode<'a> for LoginStartC2s<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            name: Bounded::decode(r)?,
            player_uuid: Uuid::decode(r)?,
        })
    }
}

impl Packet for LoginStartC2s<'_> {
    const OPCODE: i32 = 0x00;
    const PHASE: Phase = Phase::Login;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "LoginStartC2s";
}

/// Serverbound, opcode 0x01. Response to [`LoginEncryptionRequestS2c`]:
/// the shared secret and verify token, both RSA-encrypted under the
/// server's public key (this crate carries the ciphertext opaquely).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LoginEncryptionResponseC2s<'a> {
    pub shared_secret: &'a [u8],
    pub verify_token: &'a [u8],
}

impl Encode for LoginEncryptionResponseC2s<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.shared_secret.encode(&mut w)?;
        self.verify_token.encode(w)
    }
}

impl<'a> Decode<'a> for LoginEncryptionResponseC2s<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            shared_secret: <&[u8]>::decode(r)?,
            verify_token: <&[u8]>::decode(r)?,
        })
    }
}

impl Packet for LoginEncryptionResponseC2s<'_> {
    const OPCODE: i32 = 0x01;
    const PHASE: Phase = Phase::Login;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "LoginEncryptionResponseC2s";
}

/// Serverbound, opcode 0x02. Answers a server-sent plugin query.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LoginPluginResponseC2s<'a> {
    pub message_id: VarInt,
    pub data: Option<Bounded<RawBytes<'a>, 1048576>>,
}

impl Encode for LoginPluginResponseC2s<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.message_id.encode(&mut w)?;
        self.data.encode(w)
    }
}

impl<'a> Decode<'a> for LoginPluginResponseC2s<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            message_id: VarInt::decode(r)?,
            data: Decode::decode(r)?,
        })
    }
}

impl Packet for LoginPluginResponseC2s<'_> {
    const OPCODE: i32 = 0x02;
    const PHASE: Phase = Phase::Login;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "LoginPluginResponseC2s";
}

/// Serverbound, opcode 0x03. No payload; acknowledges [`LoginSuccessS2c`]
/// and triggers the LOGIN → CONFIGURATION transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LoginAcknowledgedC2s;

impl Encode for LoginAcknowledgedC2s {
    fn encode(&self, _w: impl Write) -> anyhow::Result<()> {
        Ok(())
    }
}

impl Decode<'_> for LoginAcknowledgedC2s {
    fn decode(_r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(LoginAcknowledgedC2s)
    }
}

impl Packet for LoginAcknowledgedC2s {
    const OPCODE: i32 = 0x03;
    const PHASE: Phase = Phase::Login;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "LoginAcknowledgedC2s";
}

/// Clientbound, opcode 0x00. Ends the connection with a reason shown in
/// the client's disconnect screen, as legacy JSON (login phase predates
/// the NBT text component).
#[derive(Clone, PartialEq, Debug)]
pub struct LoginDisconnectS2c<'a> {
    pub reason: Cow<'a, Text>,
}

impl Encode for LoginDisconnectS2c<'_> {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        crate::text::LegacyJson(&self.reason).encode(w)
    }
}

impl<'a> Decode<'a> for LoginDisconnectS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let owned = crate::text::LegacyJsonOwned::decode(r)?;
        Ok(Self {
            reason: Cow::Owned(owned.0),
        })
    }
}

impl Packet for LoginDisconnectS2c<'_> {
    const OPCODE: i32 = 0x00;
    const PHASE: Phase = Phase::Login;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "LoginDisconnectS2c";
}

/// Clientbound, opcode 0x01. Kicks off the (out of scope) key exchange;
/// the DER-encoded public key and verify token are carried opaquely.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LoginEncryptionRequestS2c<'a> {
    pub server_id: Bounded<&'a str, 20>,
    pub public_key: &'a [u8],
    pub verify_token: &'a [u8],
    pub should_authenticate: bool,
}

impl Encode for LoginEncryptionRequestS2c<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.server_id.encode(&mut w)?;
        self.public_key.encode(&mut w)?;
        self.verify_token.encode(&mut w)?;
        self.should_authenticate.encode(w)
    }
}

impl<'a> Decode<'a> for LoginEncryptionRequestS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            server_id: Bounded::decode(r)?,
            public_key: <&[u8]>::decode(r)?,
            verify_token: <&[u8]>::decode(r)?,
            should_authenticate: bool::decode(r)?,
        })
    }
}

impl Packet for LoginEncryptionRequestS2c<'_> {
    const OPCODE: i32 = 0x01;
    const PHASE: Phase = Phase::Login;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "LoginEncryptionRequestS2c";
}

/// Clientbound, opcode 0x02. Confirms the login and supplies the
/// authoritative profile (uuid, username, signed properties).
#[derive(Clone, PartialEq, Debug)]
pub struct LoginSuccessS2c<'a> {
    pub uuid: Uuid,
    pub username: Bounded<&'a str, 16>,
    pub properties: Cow<'a, [Property<'a>]>,
}

impl Encode for LoginSuccessS2c<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.uuid.encode(&mut w)?;
        self.username.encode(&mut w)?;
        self.properties.encode(w)
    }
}

impl<'a> Decode<'a> for LoginSuccessS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            uuid: Uuid::decode(r)?,
            username: Bounded::decode(r)?,
            properties: Cow::Owned(Vec::decode(r)?),
        })
    }
}

impl Packet for LoginSuccessS2c<'_> {
    const OPCODE: i32 = 0x02;
    const PHASE: Phase = Phase::Login;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "LoginSuccessS2c";
}

/// Clientbound, opcode 0x03. Sets the compression threshold (C7) for all
/// subsequent frames in both directions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LoginSetCompressionS2c {
    pub threshold: VarInt,
}

impl Encode for LoginSetCompressionS2c {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.threshold.encode(w)
    }
}

impl Decode<'_> for LoginSetCompressionS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            threshold: VarInt::decode(r)?,
        })
    }
}

impl Packet for LoginSetCompressionS2c {
    const OPCODE: i32 = 0x03;
    const PHASE: Phase = Phase::Login;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "LoginSetCompressionS2c";
}

/// Clientbound, opcode 0x04. A server-to-client plugin query, answered by
/// [`LoginPluginResponseC2s`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LoginPluginRequestS2c<'a> {
    pub message_id: VarInt,
    pub channel: mc_ident::Ident,
    pub data: Bounded<RawBytes<'a>, 1048576>,
}

impl Encode for LoginPluginRequestS2c<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.message_id.encode(&mut w)?;
        self.channel.encode(&mut w)?;
        self.data.encode(w)
    }
}

impl<'a> Decode<'a> for LoginPluginRequestS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            message_id: VarInt::decode(r)?,
            channel: mc_ident::Ident::decode(r)?,
            data: Bounded::decode(r)?,
        })
    }
}

impl Packet for LoginPluginRequestS2c<'_> {
    const OPCODE: i32 = 0x04;
    const PHASE: Phase = Phase::Login;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "LoginPluginRequestS2c";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_start_round_trips_per_e5() {
        let uuid = Uuid::parse_str("00112233-4455-6677-8899-aabbccddeeff").unwrap();
        let pkt = LoginStartC2s {
            name: Bounded("Notch"),
            player_uuid: uuid,
        };
        let mut buf = Vec::new();
        pkt.encode(&mut buf).unwrap();

        let mut expected = vec![5u8];
        expected.extend_from_slice(b"Notch");
        expected.extend_from_slice(uuid.as_bytes());
        assert_eq!(buf, expected);

        let mut slice = buf.as_slice();
        assert_eq!(LoginStartC2s::decode(&mut slice).unwrap(), pkt);
    }

    #[test]
    fn login_success_round_trips() {
        let pkt = LoginSuccessS2c {
            uuid: Uuid::nil(),
            username: Bounded("Notch"),
            properties: Cow::Owned(vec![]),
        };
        let mut buf = Vec::new();
        pkt.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        let decoded = LoginSuccessS2c::decode(&mut slice).unwrap();
        assert_eq!(decoded.uuid, pkt.uuid);
        assert_eq!(decoded.username.0, pkt.username.0);
    }
}
