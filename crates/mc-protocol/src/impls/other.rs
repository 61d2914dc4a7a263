use std::io::Write;

use anyhow::bail;
use mc_nbt::{Compound, Value};

use crate::{Decode, Encode};

impl Encode for Compound {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        Ok(mc_nbt::to_binary_unnamed(self, w)?)
    }
}

impl<'a> Decode<'a> for Compound {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        // A single `0x00` is an empty/absent compound (no TAG_Compound
        // header follows), used by slot NBT and similar optional-NBT
        // fields.
        if r.first() == Some(&0) {
            *r = &r[1..];
            return Ok(Compound::new());
        }

        match mc_nbt::from_binary_unnamed_prefix(r)? {
            None => Ok(Compound::new()),
            Some(Value::Compound(c)) => Ok(c),
            Some(_) => bail!("expected a TAG_Compound root"),
        }
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            Some(t) => {
                true.encode(&mut w)?;
                t.encode(w)
            }
            None => false.encode(w),
        }
    }
}

impl<'a, T: Decode<'a>> Decode<'a> for Option<T> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(if bool::decode(r)? {
            Some(T::decode(r)?)
        } else {
            None
        })
    }
}
