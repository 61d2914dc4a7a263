use std::io::Write;

use mc_ident::Ident;

use crate::{Decode, Encode};

impl Encode for Ident {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.as_str().encode(w)
    }
}

impl<'a> Decode<'a> for Ident {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Ident::new(<&str>::decode(r)?)?)
    }
}
