use std::io::Write;

use anyhow::ensure;
use mc_nbt::Compound;

use crate::{Decode, Encode, VarInt};

/// A stack of items in an inventory slot, in the targeted protocol
/// revision's format: `present` flag, raw numeric item id, count, and
/// optional NBT (absent is written as a single `0x00` byte rather than
/// omitted entirely). The component-based slot format introduced in later
/// revisions is not modeled here.
#[derive(Clone, PartialEq, Debug)]
pub struct ItemStack {
    pub item_id: i32,
    count: u8,
    pub nbt: Option<Compound>,
}

impl ItemStack {
    pub const STACK_MIN: u8 = 1;
    pub const STACK_MAX: u8 = 127;

    #[must_use]
    pub fn new(item_id: i32, count: u8, nbt: Option<Compound>) -> Self {
        Self {
            item_id,
            count: count.clamp(Self::STACK_MIN, Self::STACK_MAX),
            nbt,
        }
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn set_count(&mut self, count: u8) {
        self.count = count.clamp(Self::STACK_MIN, Self::STACK_MAX);
    }
}

impl Encode for Option<ItemStack> {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.as_ref().encode(w)
    }
}

impl<'a> Encode for Option<&'a ItemStack> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match *self {
            None => false.encode(w),
            Some(s) => {
                true.encode(&mut w)?;
                VarInt(s.item_id).encode(&mut w)?;
                s.count.encode(&mut w)?;
                match &s.nbt {
                    Some(n) => n.encode(w),
                    None => 0u8.encode(w),
                }
            }
        }
    }
}

impl Decode<'_> for Option<ItemStack> {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        if !bool::decode(r)? {
            return Ok(None);
        }

        let item_id = VarInt::decode(r)?.0;
        let count = u8::decode(r)?;
        ensure!(
            (ItemStack::STACK_MIN..=ItemStack::STACK_MAX).contains(&count),
            "invalid item stack count (got {count}, expected {}..={})",
            ItemStack::STACK_MIN,
            ItemStack::STACK_MAX,
        );

        let nbt = if let [0, rest @ ..] = *r {
            *r = rest;
            None
        } else {
            Some(Compound::decode(r)?)
        };

        Ok(Some(ItemStack {
            item_id,
            count,
            nbt,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_stack_clamps_count() {
        let mut stack = ItemStack::new(1, 200, None);
        assert_eq!(stack.count(), ItemStack::STACK_MAX);
        stack.set_count(0);
        assert_eq!(stack.count(), ItemStack::STACK_MIN);
    }

    #[test]
    fn empty_slot_round_trips() {
        let slot: Option<ItemStack> = None;
        let mut buf = Vec::new();
        slot.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(Option::<ItemStack>::decode(&mut slice).unwrap(), None);
    }

    #[test]
    fn present_slot_without_nbt_round_trips() {
        let slot = Some(ItemStack::new(5, 3, None));
        let mut buf = Vec::new();
        slot.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(Option::<ItemStack>::decode(&mut slice).unwrap(), slot);
    }

    #[test]
    fn invalid_count_rejected() {
        let mut bytes = vec![1u8];
        VarInt(5).encode(&mut bytes).unwrap();
        bytes.push(0); // count = 0, invalid
        bytes.push(0); // empty nbt
        let mut slice = bytes.as_slice();
        assert!(Option::<ItemStack>::decode(&mut slice).is_err());
    }
}
