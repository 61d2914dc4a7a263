use std::io::Write;

use crate::{Decode, Encode, ItemStack};

/// One entry in a villager's trade list, as carried by `TradeListS2c`.
#[derive(Clone, PartialEq, Debug)]
pub struct Trade {
    pub input_one: Option<ItemStack>,
    pub output: Option<ItemStack>,
    pub input_two: Option<ItemStack>,
    pub disabled: bool,
    pub uses: i32,
    pub max_uses: i32,
    pub xp: i32,
    pub special_price: i32,
    pub price_multiplier: f32,
    pub demand: i32,
}

impl Encode for Trade {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.input_one.encode(&mut w)?;
        self.output.encode(&mut w)?;
        self.input_two.encode(&mut w)?;
        self.disabled.encode(&mut w)?;
        self.uses.encode(&mut w)?;
        self.max_uses.encode(&mut w)?;
        self.xp.encode(&mut w)?;
        self.special_price.encode(&mut w)?;
        self.price_multiplier.encode(&mut w)?;
        self.demand.encode(w)
    }
}

impl Decode<'_> for Trade {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Trade {
            input_one: Decode::decode(r)?,
            output: Decode::decode(r)?,
            input_two: Decode::decode(r)?,
            disabled: bool::decode(r)?,
            uses: i32::decode(r)?,
            max_uses: i32::decode(r)?,
            xp: i32::decode(r)?,
            special_price: i32::decode(r)?,
            price_multiplier: f32::decode(r)?,
            demand: i32::decode(r)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_round_trips() {
        let trade = Trade {
            input_one: Some(ItemStack::new(1, 1, None)),
            output: Some(ItemStack::new(2, 3, None)),
            input_two: None,
            disabled: false,
            uses: 0,
            max_uses: 12,
            xp: 1,
            special_price: 0,
            price_multiplier: 0.05,
            demand: 0,
        };
        let mut buf = Vec::new();
        trade.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(Trade::decode(&mut slice).unwrap(), trade);
    }
}
