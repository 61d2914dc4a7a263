use std::io::Write;

use anyhow::{bail, ensure};

use crate::{Decode, Encode};

/// A variable-length encoding of a signed 32-bit integer. Seven payload bits
/// per byte, LSB first, high bit set while more bytes follow. No zig-zag:
/// negative values always take the maximum 5 bytes.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct VarInt(pub i32);

impl VarInt {
    /// Largest possible size of an encoded `VarInt`.
    pub const MAX_SIZE: usize = 5;

    pub fn written_size(self) -> usize {
        match self.0 {
            0 => 1,
            n => {
                let bits = 32 - (n as u32).leading_zeros() as usize;
                bits.div_ceil(7).max(1)
            }
        }
    }

    /// Reads a `VarInt` from an incrementally-filling buffer, returning
    /// `Ok(None)` if not enough bytes have arrived yet rather than failing.
    pub fn decode_partial(mut r: impl std::io::Read) -> anyhow::Result<Option<i32>> {
        let mut val = 0u32;
        for i in 0..Self::MAX_SIZE {
            let mut byte = [0u8; 1];
            match r.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => return Ok(None),
                Err(e) => return Err(e.into()),
            }
            let byte = byte[0];
            val |= ((byte & 0x7f) as u32) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(Some(val as i32));
            }
        }
        bail!("VarInt is too large (more than {} bytes)", Self::MAX_SIZE)
    }
}

impl From<i32> for VarInt {
    fn from(v: i32) -> Self {
        VarInt(v)
    }
}

impl From<VarInt> for i32 {
    fn from(v: VarInt) -> Self {
        v.0
    }
}

impl Encode for VarInt {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        let mut val = self.0 as u32;
        loop {
            let byte = (val & 0x7f) as u8;
            val >>= 7;
            if val == 0 {
                w.write_all(&[byte])?;
                return Ok(());
            }
            w.write_all(&[byte | 0x80])?;
        }
    }
}

impl<'a> Decode<'a> for VarInt {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let mut val = 0u32;
        for i in 0..Self::MAX_SIZE {
            ensure!(!r.is_empty(), "not enough data to decode VarInt");
            let byte = r[0];
            *r = &r[1..];
            val |= ((byte & 0x7f) as u32) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(VarInt(val as i32));
            }
        }
        bail!("VarInt is too large (more than {} bytes)", Self::MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_cases() {
        let cases: &[(i32, &[u8])] = &[
            (0, &[0x00]),
            (1, &[0x01]),
            (127, &[0x7f]),
            (128, &[0x80, 0x01]),
            (2147483647, &[0xff, 0xff, 0xff, 0xff, 0x07]),
            (-1, &[0xff, 0xff, 0xff, 0xff, 0x0f]),
        ];

        for &(value, bytes) in cases {
            let mut out = Vec::new();
            VarInt(value).encode(&mut out).unwrap();
            assert_eq!(out, bytes, "encoding {value}");

            let mut slice = bytes;
            let decoded = VarInt::decode(&mut slice).unwrap();
            assert_eq!(decoded.0, value, "decoding {bytes:?}");
            assert!(slice.is_empty());
        }
    }

    #[test]
    fn round_trip() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let n: i32 = rng.gen();
            let mut out = Vec::new();
            VarInt(n).encode(&mut out).unwrap();
            assert_eq!(out.len(), VarInt(n).written_size());
            let mut slice = out.as_slice();
            assert_eq!(VarInt::decode(&mut slice).unwrap().0, n);
            assert!(slice.is_empty());
        }
    }

    #[test]
    fn overlong_encoding_fails() {
        let bytes = [0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        let mut slice = &bytes[..];
        assert!(VarInt::decode(&mut slice).is_err());
    }

    #[test]
    fn truncated_fails() {
        let bytes = [0x80, 0x80];
        let mut slice = &bytes[..];
        assert!(VarInt::decode(&mut slice).is_err());
    }
}
