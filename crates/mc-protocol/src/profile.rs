use std::io::Write;

use crate::{Decode, Encode};

/// A signed property of a game profile (most commonly `textures`, carrying
/// the player's skin/cape). The value and signature are opaque base64
/// blobs as far as this crate is concerned; nothing here decodes them.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Property<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub signature: Option<&'a str>,
}

impl Encode for Property<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.name.encode(&mut w)?;
        self.value.encode(&mut w)?;
        self.signature.encode(w)
    }
}

impl<'a> Decode<'a> for Property<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            name: <&str>::decode(r)?,
            value: <&str>::decode(r)?,
            signature: Option::<&str>::decode(r)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_round_trips_without_signature() {
        let prop = Property {
            name: "textures",
            value: "eyJ0ZXh0dXJlcyI6e319",
            signature: None,
        };
        let mut buf = Vec::new();
        prop.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(Property::decode(&mut slice).unwrap(), prop);
    }
}
