use std::io::Write;

use crate::phase::Phase;
use crate::{Decode, Encode, Packet, PacketSide, VarInt};

/// The very first packet of any connection. Selects whether the rest of the
/// conversation happens in STATUS or LOGIN.
#[derive(Clone, PartialEq, Debug)]
pub struct HandshakeC2s<'a> {
    pub protocol_version: VarInt,
    pub server_address: &'a str,
    pub server_port: u16,
    pub next_state: HandshakeNextState,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum HandshakeNextState {
    Status,
    Login,
}

impl HandshakeNextState {
    fn id(self) -> i32 {
        match self {
            HandshakeNextState::Status => 1,
            HandshakeNextState::Login => 2,
        }
    }

    fn from_id(id: i32) -> anyhow::Result<Self> {
        match id {
            1 => Ok(HandshakeNextState::Status),
            2 => Ok(HandshakeNextState::Login),
            other => anyhow::bail!("invalid handshake next_state {other}"),
        }
    }
}

impl Encode for HandshakeC2s<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.protocol_version.encode(&mut w)?;
        self.server_address.encode(&mut w)?;
        self.server_port.encode(&mut w)?;
        VarInt(self.next_state.id()).encode(w)
    }
}

impl<'a> Decode<'a> for HandshakeC2s<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            protocol_version: VarInt::decode(r)?,
            server_address: <&str>::decode(r)?,
            server_port: u16::decode(r)?,
            next_state: HandshakeNextState::from_id(VarInt::decode(r)?.0)?,
        })
    }
}

impl Packet for HandshakeC2s<'_> {
    const OPCODE: i32 = 0x00;
    const PHASE: Phase = Phase::Handshake;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "HandshakeC2s";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_round_trips_per_e1() {
        let pkt = HandshakeC2s {
            protocol_version: VarInt(765),
            server_address: "localhost",
            server_port: 25565,
            next_state: HandshakeNextState::Login,
        };
        let mut buf = Vec::new();
        pkt.encode(&mut buf).unwrap();

        let mut expected = Vec::new();
        VarInt(765).encode(&mut expected).unwrap();
        "localhost".encode(&mut expected).unwrap();
        25565u16.encode(&mut expected).unwrap();
        VarInt(2).encode(&mut expected).unwrap();
        assert_eq!(buf, expected);

        let mut slice = buf.as_slice();
        assert_eq!(HandshakeC2s::decode(&mut slice).unwrap(), pkt);
        assert!(slice.is_empty());
    }
}
