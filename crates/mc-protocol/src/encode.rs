use std::io::{Read, Write};

#[cfg(feature = "encryption")]
use aes::cipher::generic_array::GenericArray;
#[cfg(feature = "encryption")]
use aes::cipher::{BlockEncryptMut, BlockSizeUser, KeyIvInit};
use anyhow::ensure;
use bytes::{BufMut, BytesMut};
use tracing::{debug, trace, warn};

use crate::var_int::VarInt;
use crate::{Encode, Packet, MAX_PACKET_SIZE};

#[cfg(feature = "encryption")]
type Cipher = cfb8::Encryptor<aes::Aes128>;

/// Packets below this body length (in bytes) are left uncompressed, prefixed
/// with a zero "uncompressed length" varint; `< 0` disables compression
/// entirely. Set from the server's `SetCompression` login packet.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CompressionThreshold(pub i32);

impl Default for CompressionThreshold {
    fn default() -> Self {
        CompressionThreshold(-1)
    }
}

/// Builds outgoing frames: opcode + payload, length-prefixed, optionally
/// zlib-compressed above `threshold`, optionally AES-CFB8 encrypted.
#[derive(Default)]
pub struct PacketEncoder {
    buf: BytesMut,
    #[cfg(feature = "compression")]
    compress_buf: Vec<u8>,
    #[cfg(feature = "compression")]
    threshold: CompressionThreshold,
    #[cfg(feature = "encryption")]
    cipher: Option<Cipher>,
}

impl PacketEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "compression")]
    pub fn set_compression(&mut self, threshold: CompressionThreshold) {
        debug!(threshold = threshold.0, "compression threshold set");
        self.threshold = threshold;
    }

    #[cfg(feature = "encryption")]
    pub fn enable_encryption(&mut self, key: &[u8; 16]) {
        assert!(self.cipher.is_none(), "encryption is already enabled");
        debug!("stream encryption enabled");
        self.cipher = Some(Cipher::new_from_slices(key, key).expect("invalid key"));
    }

    pub fn append_packet<P>(&mut self, pkt: &P) -> anyhow::Result<()>
    where
        P: Packet + Encode,
    {
        pkt.validate().map_err(|e| {
            warn!(packet = P::NAME, "packet failed validation: {e:#}");
            e
        })?;

        let start = self.buf.len();
        VarInt(P::OPCODE).encode((&mut self.buf).writer())?;
        pkt.encode((&mut self.buf).writer())?;
        self.enframe_from(start)?;

        trace!(
            phase = ?P::PHASE,
            opcode = P::OPCODE,
            len = self.buf.len() - start,
            "wrote frame"
        );

        Ok(())
    }

    fn enframe_from(&mut self, from: usize) -> anyhow::Result<()> {
        let data_len = self.buf.len() - from;

        #[cfg(feature = "compression")]
        if self.threshold.0 >= 0 {
            if data_len >= self.threshold.0 as usize {
                use flate2::bufread::ZlibEncoder;
                use flate2::Compression;

                let mut z = ZlibEncoder::new(&self.buf[from..], Compression::new(4));
                self.compress_buf.clear();
                z.read_to_end(&mut self.compress_buf)?;
                drop(z);

                let packet_len =
                    VarInt(data_len as i32).written_size() + self.compress_buf.len();
                ensure!(
                    packet_len <= MAX_PACKET_SIZE as usize,
                    "packet exceeds maximum length"
                );

                self.buf.truncate(from);
                let mut w = (&mut self.buf).writer();
                VarInt(packet_len as i32).encode(&mut w)?;
                VarInt(data_len as i32).encode(&mut w)?;
                self.buf.extend_from_slice(&self.compress_buf);
            } else {
                let packet_len = 1 + data_len;
                ensure!(
                    packet_len <= MAX_PACKET_SIZE as usize,
                    "packet exceeds maximum length"
                );
                let prefix_len = VarInt(packet_len as i32).written_size() + 1;
                self.buf.put_bytes(0, prefix_len);
                self.buf.copy_within(from..from + data_len, from + prefix_len);

                let mut front = &mut self.buf[from..];
                VarInt(packet_len as i32).encode(&mut front)?;
                VarInt(0).encode(front)?;
            }
            return Ok(());
        }

        let packet_len = data_len;
        ensure!(
            packet_len <= MAX_PACKET_SIZE as usize,
            "packet exceeds maximum length"
        );
        let prefix_len = VarInt(packet_len as i32).written_size();
        self.buf.put_bytes(0, prefix_len);
        self.buf.copy_within(from..from + data_len, from + prefix_len);

        let front = &mut self.buf[from..];
        VarInt(packet_len as i32).encode(front)?;

        Ok(())
    }

    /// Takes all frames appended so far, encrypting them in place first if
    /// encryption is enabled.
    pub fn take(&mut self) -> BytesMut {
        #[cfg(feature = "encryption")]
        if let Some(cipher) = &mut self.cipher {
            for chunk in self.buf.chunks_mut(Cipher::block_size()) {
                let gen_arr = GenericArray::from_mut_slice(chunk);
                cipher.encrypt_block_mut(gen_arr);
            }
        }

        self.buf.split()
    }
}

/// Types that packets can be written into. Failures are logged and
/// discarded by [`WritePacket::write_packet`]; use
/// [`WritePacket::write_packet_fallible`] to observe them.
pub trait WritePacket {
    fn write_packet<P>(&mut self, packet: &P)
    where
        P: Packet + Encode,
    {
        if let Err(e) = self.write_packet_fallible(packet) {
            warn!("failed to write packet '{}': {e:#}", P::NAME);
        }
    }

    fn write_packet_fallible<P>(&mut self, packet: &P) -> anyhow::Result<()>
    where
        P: Packet + Encode;
}

impl WritePacket for PacketEncoder {
    fn write_packet_fallible<P>(&mut self, packet: &P) -> anyhow::Result<()>
    where
        P: Packet + Encode,
    {
        self.append_packet(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;
    use crate::PacketSide;

    struct Ping(i32);

    impl Encode for Ping {
        fn encode(&self, w: impl Write) -> anyhow::Result<()> {
            VarInt(self.0).encode(w)
        }
    }

    impl Packet for Ping {
        const OPCODE: i32 = 0x01;
        const PHASE: Phase = Phase::Status;
        const SIDE: PacketSide = PacketSide::Serverbound;
        const NAME: &'static str = "Ping";
    }

    #[test]
    fn uncompressed_frame_has_length_prefix() {
        let mut enc = PacketEncoder::new();
        enc.append_packet(&Ping(7)).unwrap();
        let bytes = enc.take();

        // length, opcode, payload(varint 7) => 3 bytes total, then 1-byte len.
        assert_eq!(bytes.len(), 4);
        assert_eq!(bytes[0], 3);
        assert_eq!(bytes[1], 0x01);
        assert_eq!(bytes[2], 7);
    }

    #[cfg(feature = "compression")]
    #[test]
    fn below_threshold_packets_are_uncompressed() {
        let mut enc = PacketEncoder::new();
        enc.set_compression(CompressionThreshold(1024));
        enc.append_packet(&Ping(7)).unwrap();
        let bytes = enc.take();

        // length, data_len(=0 meaning uncompressed), opcode, payload
        assert_eq!(&bytes[..], &[3, 0, 0x01, 7]);
    }
}
