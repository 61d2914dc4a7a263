//! The async driver that sits on top of [`PacketEncoder`]/[`PacketDecoder`]
//! and an actual socket. This crate is client-side only, so unlike a
//! server's connection handling there is no fan-out across many peers: one
//! `Connection` owns one stream and is read/written from a single task.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::decode::{PacketDecoder, PacketFrame};
use crate::encode::{CompressionThreshold, PacketEncoder};
use crate::phase::{Phase, Transition};
use crate::{Decode, Encode, Packet, ProtocolError};

const READ_BUF_SIZE: usize = 4096;

/// A client-side connection to a Minecraft server: a socket plus the
/// encoder/decoder pair and the connection's current protocol phase.
pub struct Connection<S> {
    stream: S,
    enc: PacketEncoder,
    dec: PacketDecoder,
    phase: Phase,
    read_buf: Vec<u8>,
    /// The most recently assembled frame. Kept as a field, not a local, so
    /// that `recv`'s borrowed-data packets (`StatusResponseS2c<'a>` and
    /// friends) can borrow from its body for as long as `&mut self` is held.
    frame: PacketFrame,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            enc: PacketEncoder::new(),
            dec: PacketDecoder::new(),
            phase: Phase::Handshake,
            read_buf: Vec::with_capacity(READ_BUF_SIZE),
            frame: PacketFrame { opcode: -1, body: Vec::new() },
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Applies a phase transition, e.g. after sending `LoginAcknowledgedC2s`
    /// or receiving `FinishConfigurationS2c`.
    pub fn transition(&mut self, transition: Transition) {
        self.phase = self.phase.apply(transition);
    }

    /// Sets the compression threshold for both directions, as instructed by
    /// a `LoginSetCompressionS2c` packet.
    #[cfg(feature = "compression")]
    pub fn set_compression(&mut self, threshold: CompressionThreshold) {
        self.enc.set_compression(threshold);
        self.dec.set_compression(threshold);
    }

    /// Enables AES-CFB8 stream encryption for both directions, as the last
    /// step of the login encryption handshake.
    #[cfg(feature = "encryption")]
    pub fn enable_encryption(&mut self, key: &[u8; 16]) {
        self.enc.enable_encryption(key);
        self.dec.enable_encryption(key);
    }

    /// Encodes and sends one packet. Validates the packet first; a failure
    /// here never touches the socket.
    pub async fn send<P>(&mut self, pkt: &P) -> Result<(), ProtocolError>
    where
        P: Packet + Encode,
    {
        debug_assert_eq!(P::PHASE, self.phase, "sent {} outside its phase", P::NAME);

        self.enc.append_packet(pkt).map_err(ProtocolError::Other)?;
        let bytes = self.enc.take();
        self.stream
            .write_all(&bytes)
            .await
            .map_err(ProtocolError::from)?;

        trace!(packet = P::NAME, phase = ?self.phase, "sent packet");
        Ok(())
    }

    /// Reads one complete frame off the stream into `self.frame`, blocking
    /// (asynchronously) until enough bytes have arrived. All-or-nothing: a
    /// frame is either fully read or nothing happens at all, regardless of
    /// how many socket reads it took to assemble.
    async fn recv_frame(&mut self) -> Result<(), ProtocolError> {
        loop {
            if let Some(frame) = self.dec.try_next_frame()? {
                self.frame = frame;
                return Ok(());
            }

            self.read_buf.clear();
            self.read_buf.resize(READ_BUF_SIZE, 0);
            let n = self.stream.read(&mut self.read_buf).await.map_err(ProtocolError::from)?;

            if n == 0 {
                return Err(ProtocolError::Malformed(
                    "connection closed mid-frame".to_owned(),
                ));
            }

            self.dec.queue_bytes(&self.read_buf[..n]);
        }
    }

    /// Reads one frame and decodes it as `P`, rejecting the frame if its
    /// opcode doesn't match.
    pub async fn recv<'a, P>(&'a mut self) -> Result<P, ProtocolError>
    where
        P: Packet + Decode<'a>,
    {
        self.recv_frame().await?;
        self.frame.decode::<P>()
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packets::status::{PingRequestC2s, PongResponseS2c};
    use tokio::io::duplex;

    #[tokio::test]
    async fn send_then_recv_round_trips_over_a_duplex_stream() {
        let (client_stream, server_stream) = duplex(4096);
        let mut client = Connection::new(client_stream);
        let mut server = Connection::new(server_stream);
        client.transition(Transition::ToStatus);
        server.transition(Transition::ToStatus);

        client.send(&PingRequestC2s { payload: 42 }).await.unwrap();
        let received: PingRequestC2s = server.recv().await.unwrap();
        assert_eq!(received.payload, 42);

        server.send(&PongResponseS2c { payload: 42 }).await.unwrap();
        let pong: PongResponseS2c = client.recv().await.unwrap();
        assert_eq!(pong.payload, 42);
    }
}
