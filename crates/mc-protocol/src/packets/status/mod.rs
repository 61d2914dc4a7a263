use std::io::Write;

use crate::phase::Phase;
use crate::{Decode, Encode, Packet, PacketSide};

/// Serverbound, opcode 0x00. No payload; just asks for [`StatusResponseS2c`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StatusRequestC2s;

impl Encode for StatusRequestC2s {
    fn encode(&self, _w: impl Write) -> anyhow::Result<()> {
        Ok(())
    }
}

impl Decode<'_> for StatusRequestC2s {
    fn decode(_r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(StatusRequestC2s)
    }
}

impl Packet for StatusRequestC2s {
    const OPCODE: i32 = 0x00;
    const PHASE: Phase = Phase::Status;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "StatusRequestC2s";
}

/// Clientbound, opcode 0x00. `json` is the raw status response document
/// (version, players, description, favicon) carried verbatim; this crate
/// does not model its schema since the status payload is display-only.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StatusResponseS2c<'a> {
    pub json: &'a str,
}

impl Encode for StatusResponseS2c<'_> {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.json.encode(w)
    }
}

impl<'a> Decode<'a> for StatusResponseS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            json: <&str>::decode(r)?,
        })
    }
}

impl Packet for StatusResponseS2c<'_> {
    const OPCODE: i32 = 0x00;
    const PHASE: Phase = Phase::Status;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "StatusResponseS2c";
}

/// Serverbound and clientbound, opcode 0x01 in both directions. A single
/// opaque timestamp the server is expected to echo back unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PingRequestC2s {
    pub payload: i64,
}

impl Encode for PingRequestC2s {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.payload.encode(w)
    }
}

impl Decode<'_> for PingRequestC2s {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            payload: i64::decode(r)?,
        })
    }
}

impl Packet for PingRequestC2s {
    const OPCODE: i32 = 0x01;
    const PHASE: Phase = Phase::Status;
    const SIDE: PacketSide = PacketSide::Serverbound;
    const NAME: &'static str = "PingRequestC2s";
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PongResponseS2c {
    pub payload: i64,
}

impl Encode for PongResponseS2c {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.payload.encode(w)
    }
}

impl Decode<'_> for PongResponseS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            payload: i64::decode(r)?,
        })
    }
}

impl Packet for PongResponseS2c {
    const OPCODE: i32 = 0x01;
    const PHASE: Phase = Phase::Status;
    const SIDE: PacketSide = PacketSide::Clientbound;
    const NAME: &'static str = "PongResponseS2c";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_response_round_trips() {
        let pkt = StatusResponseS2c {
            json: r#"{"version":{"name":"1.20.1","protocol":763}}"#,
        };
        let mut buf = Vec::new();
        pkt.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(StatusResponseS2c::decode(&mut slice).unwrap(), pkt);
    }

    #[test]
    fn ping_pong_round_trip() {
        let mut buf = Vec::new();
        PingRequestC2s { payload: 7 }.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(PingRequestC2s::decode(&mut slice).unwrap().payload, 7);
    }
}
