use std::io::Write;

use anyhow::{bail, ensure};

use crate::{Decode, Encode};

macro_rules! impl_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
                    Ok(w.write_all(&self.to_be_bytes())?)
                }
            }

            impl Decode<'_> for $ty {
                fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
                    const SIZE: usize = std::mem::size_of::<$ty>();
                    ensure!(r.len() >= SIZE, concat!("not enough data to decode ", stringify!($ty)));
                    let (bytes, rest) = r.split_at(SIZE);
                    *r = rest;
                    Ok(<$ty>::from_be_bytes(bytes.try_into().unwrap()))
                }
            }
        )*
    };
}

impl_int!(i16, u16, i32, u32, i64, u64, i128, u128, f32, f64);

impl Encode for u8 {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        Ok(w.write_all(&[*self])?)
    }

    // A whole `[u8]` is written in one call instead of one per byte.
    fn encode_slice(slice: &[Self], mut w: impl Write) -> anyhow::Result<()> {
        Ok(w.write_all(slice)?)
    }
}

impl Decode<'_> for u8 {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        ensure!(!r.is_empty(), "not enough data to decode u8");
        let b = r[0];
        *r = &r[1..];
        Ok(b)
    }
}

impl Encode for i8 {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        Ok(w.write_all(&[*self as u8])?)
    }

    fn encode_slice(slice: &[Self], mut w: impl Write) -> anyhow::Result<()> {
        // SAFETY: i8 and u8 have the same layout.
        let bytes =
            unsafe { std::slice::from_raw_parts(slice.as_ptr() as *const u8, slice.len()) };
        Ok(w.write_all(bytes)?)
    }
}

impl Decode<'_> for i8 {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        ensure!(!r.is_empty(), "not enough data to decode i8");
        let b = r[0] as i8;
        *r = &r[1..];
        Ok(b)
    }
}

impl Encode for bool {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        Ok(w.write_all(&[*self as u8])?)
    }
}

impl Decode<'_> for bool {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        ensure!(!r.is_empty(), "not enough data to decode bool");
        let b = r[0];
        *r = &r[1..];
        match b {
            0 => Ok(false),
            1 => Ok(true),
            n => bail!("boolean value must be 0 or 1, got {n}"),
        }
    }
}

impl Encode for char {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        (*self as u32).encode(w)
    }
}

impl Decode<'_> for char {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let n = u32::decode(r)?;
        char::from_u32(n).ok_or_else(|| anyhow::anyhow!("{n:#x} is not a valid char"))
    }
}

impl Encode for () {
    fn encode(&self, _w: impl Write) -> anyhow::Result<()> {
        Ok(())
    }
}

impl Decode<'_> for () {
    fn decode(_r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_round_trip() {
        let mut buf = Vec::new();
        42i32.encode(&mut buf).unwrap();
        (-1i64).encode(&mut buf).unwrap();
        1.5f64.encode(&mut buf).unwrap();
        true.encode(&mut buf).unwrap();

        let mut slice = buf.as_slice();
        assert_eq!(i32::decode(&mut slice).unwrap(), 42);
        assert_eq!(i64::decode(&mut slice).unwrap(), -1);
        assert_eq!(f64::decode(&mut slice).unwrap(), 1.5);
        assert!(bool::decode(&mut slice).unwrap());
        assert!(slice.is_empty());
    }

    #[test]
    fn invalid_bool_byte_rejected() {
        let mut slice: &[u8] = &[2];
        assert!(bool::decode(&mut slice).is_err());
    }
}
