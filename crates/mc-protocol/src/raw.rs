use std::io::Write;

use anyhow::ensure;

use crate::bounded::Bounded;
use crate::{Decode, Encode};

/// The remainder of the input, carried verbatim with no length prefix of
/// its own. Used for packets that are deliberately left structurally
/// opaque (the Commands graph) and as a building block for fields that are
/// "whatever bytes are left in this sub-frame."
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RawBytes<'a>(pub &'a [u8]);

impl Encode for RawBytes<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        Ok(w.write_all(self.0)?)
    }
}

impl<'a> Decode<'a> for RawBytes<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(RawBytes(std::mem::take(r)))
    }
}

impl<const MAX: usize> Encode for Bounded<RawBytes<'_>, MAX> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        ensure!(
            self.0 .0.len() <= MAX,
            "raw byte sequence of length {} exceeds maximum of {MAX}",
            self.0 .0.len()
        );
        Ok(w.write_all(self.0 .0)?)
    }
}

impl<'a, const MAX: usize> Decode<'a> for Bounded<RawBytes<'a>, MAX> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        ensure!(
            r.len() <= MAX,
            "raw byte sequence of length {} exceeds maximum of {MAX}",
            r.len()
        );
        Ok(Bounded(RawBytes::decode(r)?))
    }
}
