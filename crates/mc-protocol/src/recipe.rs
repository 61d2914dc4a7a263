use std::io::Write;

use mc_ident::Ident;

use crate::{Decode, Encode, ItemStack, RawBytes, VarInt};

/// One ingredient slot: any one of a list of acceptable item stacks.
pub type Ingredient = Vec<Option<ItemStack>>;

/// A crafting/smelting recipe. Every kind the wire format distinguishes by
/// a literal `kind` identifier is modeled explicitly; kinds this crate
/// doesn't need to interpret (special crafting recipes, smithing trims,
/// stonecutting, …) are carried as an opaque byte blob under `Other`,
/// mirroring the registry's raw-blob fallback for structurally opaque
/// packets (see the Commands graph).
#[derive(Clone, PartialEq, Debug)]
pub enum RecipeData<'a> {
    Shapeless {
        group: String,
        category: i32,
        ingredients: Vec<Ingredient>,
        result: Option<ItemStack>,
    },
    Shaped {
        width: i32,
        height: i32,
        group: String,
        category: i32,
        ingredients: Vec<Ingredient>,
        result: Option<ItemStack>,
        show_notification: bool,
    },
    Other(RawBytes<'a>),
}

#[derive(Clone, PartialEq, Debug)]
pub struct Recipe<'a> {
    pub kind: Ident,
    pub recipe_id: Ident,
    pub data: RecipeData<'a>,
}

impl Encode for Recipe<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.kind.encode(&mut w)?;
        self.recipe_id.encode(&mut w)?;
        match &self.data {
            RecipeData::Shapeless {
                group,
                category,
                ingredients,
                result,
            } => {
                group.as_str().encode(&mut w)?;
                VarInt(*category).encode(&mut w)?;
                VarInt(ingredients.len() as i32).encode(&mut w)?;
                for ingredient in ingredients {
                    encode_ingredient(ingredient, &mut w)?;
                }
                result.encode(w)
            }
            RecipeData::Shaped {
                width,
                height,
                group,
                category,
                ingredients,
                result,
                show_notification,
            } => {
                VarInt(*width).encode(&mut w)?;
                VarInt(*height).encode(&mut w)?;
                group.as_str().encode(&mut w)?;
                VarInt(*category).encode(&mut w)?;
                for ingredient in ingredients {
                    encode_ingredient(ingredient, &mut w)?;
                }
                result.encode(&mut w)?;
                show_notification.encode(w)
            }
            RecipeData::Other(raw) => raw.encode(w),
        }
    }
}

fn encode_ingredient(ingredient: &Ingredient, mut w: impl Write) -> anyhow::Result<()> {
    VarInt(ingredient.len() as i32).encode(&mut w)?;
    for item in ingredient {
        item.encode(&mut w)?;
    }
    Ok(())
}

fn decode_ingredient<'a>(r: &mut &'a [u8]) -> anyhow::Result<Ingredient> {
    let count = VarInt::decode(r)?.0;
    let mut items = Vec::with_capacity((count as usize).min(1024));
    for _ in 0..count {
        items.push(Option::<ItemStack>::decode(r)?);
    }
    Ok(items)
}

impl<'a> Recipe<'a> {
    /// Decodes a recipe whose `kind` was already read off the wire; the
    /// remainder of `r` (after this recipe's fields) is left untouched.
    pub fn decode_with_kind(kind: Ident, r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let recipe_id = Ident::decode(r)?;

        let data = match (kind.namespace(), kind.path()) {
            ("minecraft", "crafting_shapeless") => {
                let group = <&str>::decode(r)?.to_owned();
                let category = VarInt::decode(r)?.0;
                let count = VarInt::decode(r)?.0;
                let mut ingredients = Vec::with_capacity((count as usize).min(1024));
                for _ in 0..count {
                    ingredients.push(decode_ingredient(r)?);
                }
                let result = Option::<ItemStack>::decode(r)?;
                RecipeData::Shapeless {
                    group,
                    category,
                    ingredients,
                    result,
                }
            }
            ("minecraft", "crafting_shaped") => {
                let width = VarInt::decode(r)?.0;
                let height = VarInt::decode(r)?.0;
                let group = <&str>::decode(r)?.to_owned();
                let category = VarInt::decode(r)?.0;
                let mut ingredients = Vec::with_capacity(((width * height) as usize).min(4096));
                for _ in 0..(width * height) {
                    ingredients.push(decode_ingredient(r)?);
                }
                let result = Option::<ItemStack>::decode(r)?;
                let show_notification = bool::decode(r)?;
                RecipeData::Shaped {
                    width,
                    height,
                    group,
                    category,
                    ingredients,
                    result,
                    show_notification,
                }
            }
            _ => RecipeData::Other(RawBytes::decode(r)?),
        };

        Ok(Recipe {
            kind,
            recipe_id,
            data,
        })
    }
}

impl<'a> Decode<'a> for Recipe<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let kind = Ident::decode(r)?;
        Recipe::decode_with_kind(kind, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapeless_recipe_round_trips() {
        let recipe = Recipe {
            kind: Ident::new("minecraft:crafting_shapeless").unwrap(),
            recipe_id: Ident::new("minecraft:oak_planks").unwrap(),
            data: RecipeData::Shapeless {
                group: "planks".to_owned(),
                category: 0,
                ingredients: vec![vec![Some(ItemStack::new(17, 1, None))]],
                result: Some(ItemStack::new(5, 4, None)),
            },
        };
        let mut buf = Vec::new();
        recipe.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(Recipe::decode(&mut slice).unwrap(), recipe);
    }

    #[test]
    fn opaque_recipe_kind_carries_raw_bytes() {
        let mut buf = Vec::new();
        Ident::new("minecraft:smithing_trim")
            .unwrap()
            .encode(&mut buf)
            .unwrap();
        Ident::new("minecraft:netherite_upgrade")
            .unwrap()
            .encode(&mut buf)
            .unwrap();
        buf.extend_from_slice(&[1, 2, 3, 4]);

        let mut slice = buf.as_slice();
        let recipe = Recipe::decode(&mut slice).unwrap();
        match recipe.data {
            RecipeData::Other(raw) => assert_eq!(raw.0, &[1, 2, 3, 4]),
            _ => panic!("expected opaque recipe data"),
        }
    }
}
