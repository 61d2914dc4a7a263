//! Java's "modified UTF-8" string encoding, used only by the NBT `String`
//! tag. Every other string on the wire (outside NBT) is plain UTF-8 with a
//! varint length prefix; this asymmetry is deliberate and documented at the
//! call sites that touch NBT strings.

use crate::error::{NbtError, Result};

pub fn encode(s: &str) -> Vec<u8> {
    cesu8::to_java_cesu8(s).into_owned()
}

pub fn decode(bytes: &[u8]) -> Result<String> {
    cesu8::from_java_cesu8(bytes)
        .map(|cow| cow.into_owned())
        .map_err(|_| NbtError::InvalidString)
}
