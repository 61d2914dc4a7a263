use std::io::Write;

use anyhow::{bail, ensure};

use crate::{Decode, Encode};

/// Same encoding as [`crate::VarInt`], extended to 64 bits (10-byte cap).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct VarLong(pub i64);

impl VarLong {
    pub const MAX_SIZE: usize = 10;

    pub fn written_size(self) -> usize {
        match self.0 {
            0 => 1,
            n => {
                let bits = 64 - (n as u64).leading_zeros() as usize;
                bits.div_ceil(7).max(1)
            }
        }
    }
}

impl Encode for VarLong {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        let mut val = self.0 as u64;
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

impl<'a> Decode<'a> for VarLong {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let mut val = 0u64;
        for i in 0..Self::MAX_SIZE {
            ensure!(!r.is_empty(), "not enough data to decode VarLong");
            let byte = r[0];
            *r = &r[1..];
            val |= ((byte & 0x7f) as u64) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(VarLong(val as i64));
            }
        }
        bail!("VarLong is too large (more than {} bytes)", Self::MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let n: i64 = rng.gen();
            let mut out = Vec::new();
            VarLong(n).encode(&mut out).unwrap();
            assert_eq!(out.len(), VarLong(n).written_size());
            let mut slice = out.as_slice();
            assert_eq!(VarLong::decode(&mut slice).unwrap().0, n);
        }
    }
}
