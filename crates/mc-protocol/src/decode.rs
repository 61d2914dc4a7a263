#[cfg(feature = "encryption")]
use aes::cipher::generic_array::GenericArray;
#[cfg(feature = "encryption")]
use aes::cipher::{BlockDecryptMut, BlockSizeUser, KeyIvInit};
use bytes::{Buf, BytesMut};
use tracing::{debug, trace};

use crate::encode::CompressionThreshold;
use crate::var_int::VarInt;
use crate::{Decode, Packet, ProtocolError, MAX_PACKET_SIZE};

#[cfg(feature = "encryption")]
type Cipher = cfb8::Decryptor<aes::Aes128>;

/// Dechunks incoming bytes into frames: pulls off the length prefix,
/// optionally decompresses, and leaves `(opcode, body)` ready to hand to a
/// registry lookup.
#[derive(Default)]
pub struct PacketDecoder {
    buf: BytesMut,
    #[cfg(feature = "compression")]
    threshold: CompressionThreshold,
    #[cfg(feature = "encryption")]
    cipher: Option<Cipher>,
}

impl PacketDecoder {
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
        let mut cipher = Cipher::new_from_slices(key, key).expect("invalid key");
        Self::crypt(&mut cipher, &mut self.buf);
        self.cipher = Some(cipher);
    }

    #[cfg(feature = "encryption")]
    fn crypt(cipher: &mut Cipher, bytes: &mut [u8]) {
        for chunk in bytes.chunks_mut(Cipher::block_size()) {
            let gen_arr = GenericArray::from_mut_slice(chunk);
            cipher.decrypt_block_mut(gen_arr);
        }
    }

    pub fn queue_bytes(&mut self, bytes: &[u8]) {
        #[cfg(feature = "encryption")]
        let start = self.buf.len();

        self.buf.extend_from_slice(bytes);

        #[cfg(feature = "encryption")]
        if let Some(cipher) = &mut self.cipher {
            Self::crypt(cipher, &mut self.buf[start..]);
        }
    }

    /// Attempts to split one complete frame off the front of the queued
    /// bytes. Returns `Ok(None)` when fewer bytes have arrived than the
    /// frame needs (an incomplete-length-prefix or incomplete-body case);
    /// this is not an error, just "read more and retry."
    pub fn try_next_frame(&mut self) -> Result<Option<PacketFrame>, ProtocolError> {
        let mut r = &self.buf[..];

        let len_before = r.len();
        let total_len = match VarInt::decode_partial(&mut r) {
            Ok(Some(n)) => n,
            Ok(None) => return Ok(None),
            Err(_) => {
                return Err(ProtocolError::Malformed("malformed frame length varint".into()))
            }
        };
        let len_prefix_size = len_before - r.len();

        ensure_in_bounds(total_len)?;

        if r.len() < total_len as usize {
            return Ok(None);
        }

        let mut body = &r[..total_len as usize];

        let data = if self.compression_enabled() {
            let uncompressed_len = VarInt::decode(&mut body)
                .map_err(|e| ProtocolError::Malformed(e.to_string()))?
                .0;
            ensure_in_bounds(uncompressed_len)?;

            let threshold = self.threshold_value();

            if uncompressed_len == 0 {
                if body.len() > threshold as usize {
                    return Err(ProtocolError::Malformed(format!(
                        "uncompressed packet length of {} exceeds compression threshold of {}",
                        body.len(),
                        threshold
                    )));
                }
                body.to_vec()
            } else {
                if uncompressed_len <= threshold {
                    return Err(ProtocolError::Malformed(format!(
                        "decompressed packet length of {uncompressed_len} is <= the compression \
                         threshold of {threshold}"
                    )));
                }

                use std::io::Write;

                use flate2::write::ZlibDecoder;

                let mut decoder = ZlibDecoder::new(Vec::with_capacity(uncompressed_len as usize));
                decoder.write_all(body).map_err(|e| {
                    ProtocolError::Malformed(format!("zlib decompression failed: {e}"))
                })?;
                let inflated = decoder
                    .finish()
                    .map_err(|e| ProtocolError::Malformed(format!("zlib decompression failed: {e}")))?;

                if inflated.len() != uncompressed_len as usize {
                    return Err(ProtocolError::LengthMismatch {
                        declared: uncompressed_len,
                        actual: inflated.len(),
                    });
                }

                inflated
            }
        } else {
            body.to_vec()
        };

        self.buf.advance(len_prefix_size + total_len as usize);

        let mut slice = &data[..];
        let opcode = VarInt::decode(&mut slice).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
        let consumed = data.len() - slice.len();
        let body = data[consumed..].to_vec();

        trace!(opcode = opcode.0, len = body.len(), "read frame");

        Ok(Some(PacketFrame {
            opcode: opcode.0,
            body,
        }))
    }

    fn compression_enabled(&self) -> bool {
        #[cfg(feature = "compression")]
        {
            self.threshold.0 >= 0
        }
        #[cfg(not(feature = "compression"))]
        {
            false
        }
    }

    /// The configured threshold, or a negative placeholder when the
    /// `compression` feature is compiled out. Only called from within an
    /// `if self.compression_enabled()` branch, so the placeholder value
    /// itself is never observed.
    fn threshold_value(&self) -> i32 {
        #[cfg(feature = "compression")]
        {
            self.threshold.0
        }
        #[cfg(not(feature = "compression"))]
        {
            -1
        }
    }
}

fn ensure_in_bounds(len: i32) -> Result<(), ProtocolError> {
    if (0..=MAX_PACKET_SIZE).contains(&len) {
        Ok(())
    } else {
        Err(ProtocolError::Malformed(format!("length {len} out of bounds")))
    }
}

/// One dechunked frame: opcode plus the packet body that follows it.
#[derive(Clone, Debug)]
pub struct PacketFrame {
    pub opcode: i32,
    pub body: Vec<u8>,
}

impl PacketFrame {
    pub fn decode<'a, P>(&'a self) -> Result<P, ProtocolError>
    where
        P: Packet + Decode<'a>,
    {
        if P::OPCODE != self.opcode {
            return Err(ProtocolError::UnknownOpcode {
                phase: P::PHASE,
                direction: P::SIDE,
                opcode: self.opcode,
            });
        }

        let mut r = &self.body[..];
        let pkt = P::decode(&mut r).map_err(ProtocolError::Other)?;
        pkt.validate().map_err(|e| {
            ProtocolError::ValidationFailed(e.to_string())
        })?;
        // Leftover bytes in `r` are ignored rather than rejected; only a
        // packet whose own decode logic cares would notice them.
        Ok(pkt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{CompressionThreshold, PacketEncoder};
    use crate::phase::Phase;
    use crate::{Encode, PacketSide};
    use std::io::Write;

    struct Ping(i32);

    impl Encode for Ping {
        fn encode(&self, w: impl Write) -> anyhow::Result<()> {
            VarInt(self.0).encode(w)
        }
    }

    impl<'a> Decode<'a> for Ping {
        fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
            Ok(Ping(VarInt::decode(r)?.0))
        }
    }

    impl Packet for Ping {
        const OPCODE: i32 = 0x01;
        const PHASE: Phase = Phase::Status;
        const SIDE: PacketSide = PacketSide::Serverbound;
        const NAME: &'static str = "Ping";
    }

    #[test]
    fn round_trips_through_frame() {
        let mut enc = PacketEncoder::new();
        enc.append_packet(&Ping(42)).unwrap();
        let bytes = enc.take();

        let mut dec = PacketDecoder::new();
        dec.queue_bytes(&bytes);
        let frame = dec.try_next_frame().unwrap().unwrap();
        let pkt: Ping = frame.decode().unwrap();
        assert_eq!(pkt.0, 42);
    }

    #[test]
    fn incomplete_frame_yields_none() {
        let mut dec = PacketDecoder::new();
        dec.queue_bytes(&[5]); // claims 5 more bytes, none supplied
        assert!(dec.try_next_frame().unwrap().is_none());
    }

    #[test]
    fn compressed_frame_at_or_below_threshold_is_rejected() {
        let mut dec = PacketDecoder::new();
        dec.set_compression(CompressionThreshold(10));

        // Claims a decompressed length of 5, at or below the threshold of
        // 10; this should be rejected before the (garbage) payload is ever
        // run through zlib.
        let mut inner = Vec::new();
        VarInt(5).encode(&mut inner).unwrap();
        inner.extend_from_slice(&[0, 0, 0]);

        let mut frame = Vec::new();
        VarInt(inner.len() as i32).encode(&mut frame).unwrap();
        frame.extend_from_slice(&inner);

        dec.queue_bytes(&frame);
        assert!(matches!(
            dec.try_next_frame(),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn uncompressed_body_over_threshold_is_rejected() {
        let mut dec = PacketDecoder::new();
        dec.set_compression(CompressionThreshold(4));

        // Claims to be uncompressed (leading 0) but carries 10 body bytes,
        // over the threshold of 4.
        let mut inner = Vec::new();
        VarInt(0).encode(&mut inner).unwrap();
        inner.extend_from_slice(&[0u8; 10]);

        let mut frame = Vec::new();
        VarInt(inner.len() as i32).encode(&mut frame).unwrap();
        frame.extend_from_slice(&inner);

        dec.queue_bytes(&frame);
        assert!(matches!(
            dec.try_next_frame(),
            Err(ProtocolError::Malformed(_))
        ));
    }
}
