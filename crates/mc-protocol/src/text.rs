//! Chat/text components. Two wire encodings coexist for the same value:
//! legacy JSON (login-phase disconnect reasons, legacy status responses)
//! and NBT (play/configuration phase). [`Text`] itself is the shared data
//! model; callers pick a projection at the call site via [`Encode`]/
//! [`Decode`] on `Text` (NBT, the more common case) or the [`LegacyJson`]
//! wrapper (JSON).

use std::io::Write;

use anyhow::{bail, Context};
use mc_nbt::{Object, Schema, Value};
use serde::{Deserialize, Serialize};

use crate::bounded::Bounded;
use crate::{Decode, Encode};

const MAX_TEXT_CHARS: usize = 262144;

#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
pub struct Text {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub underlined: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub obfuscated: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub extra: Vec<Text>,
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    fn to_object(&self) -> Object {
        let mut fields = Vec::new();
        if let Some(s) = &self.text {
            fields.push(("text".to_owned(), Object::String(s.clone())));
        }
        if let Some(c) = &self.color {
            fields.push(("color".to_owned(), Object::String(c.clone())));
        }
        for (key, val) in [
            ("bold", self.bold),
            ("italic", self.italic),
            ("underlined", self.underlined),
            ("strikethrough", self.strikethrough),
            ("obfuscated", self.obfuscated),
        ] {
            if let Some(b) = val {
                fields.push((key.to_owned(), Object::Byte(b as i8)));
            }
        }
        if !self.extra.is_empty() {
            fields.push((
                "extra".to_owned(),
                Object::List(self.extra.iter().map(Text::to_object).collect()),
            ));
        }
        Object::Compound(fields)
    }

    fn max_depth(&self) -> usize {
        1 + self.extra.iter().map(Text::max_depth).max().unwrap_or(0)
    }

    fn schema(depth: usize) -> Schema {
        let mut fields = vec![
            ("text".to_owned(), Schema::String),
            ("color".to_owned(), Schema::String),
            ("bold".to_owned(), Schema::Byte),
            ("italic".to_owned(), Schema::Byte),
            ("underlined".to_owned(), Schema::Byte),
            ("strikethrough".to_owned(), Schema::Byte),
            ("obfuscated".to_owned(), Schema::Byte),
        ];
        if depth > 0 {
            fields.push((
                "extra".to_owned(),
                Schema::List(Box::new(Self::schema(depth - 1))),
            ));
        }
        Schema::Compound(fields)
    }

    /// Projects this component to an NBT value, ready for
    /// [`mc_nbt::to_binary_unnamed`].
    pub fn to_nbt(&self) -> anyhow::Result<Value> {
        let schema = Self::schema(self.max_depth());
        Ok(mc_nbt::from_object(&self.to_object(), &schema)?)
    }

    /// Inverse of [`Text::to_nbt`].
    pub fn from_nbt(value: &Value) -> anyhow::Result<Self> {
        from_object_tree(&mc_nbt::to_object(value))
    }
}

fn get_field<'a>(fields: &'a [(String, Object)], key: &str) -> Option<&'a Object> {
    fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

fn from_object_tree(object: &Object) -> anyhow::Result<Text> {
    let Object::Compound(fields) = object else {
        bail!("expected a compound-shaped text component");
    };

    let text = match get_field(fields, "text") {
        Some(Object::String(s)) => Some(s.clone()),
        Some(_) => bail!("\"text\" field must be a string"),
        None => None,
    };
    let color = match get_field(fields, "color") {
        Some(Object::String(s)) => Some(s.clone()),
        Some(_) => bail!("\"color\" field must be a string"),
        None => None,
    };
    let bool_field = |key: &str| -> anyhow::Result<Option<bool>> {
        Ok(match get_field(fields, key) {
            Some(Object::Byte(b)) => Some(*b != 0),
            Some(_) => bail!("\"{key}\" field must be a byte"),
            None => None,
        })
    };
    let extra = match get_field(fields, "extra") {
        Some(Object::List(items)) => items
            .iter()
            .map(from_object_tree)
            .collect::<anyhow::Result<Vec<_>>>()?,
        Some(_) => bail!("\"extra\" field must be a list"),
        None => Vec::new(),
    };

    Ok(Text {
        text,
        color,
        bold: bool_field("bold")?,
        italic: bool_field("italic")?,
        underlined: bool_field("underlined")?,
        strikethrough: bool_field("strikethrough")?,
        obfuscated: bool_field("obfuscated")?,
        extra,
    })
}

impl Encode for Text {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        let compound = match self.to_nbt()? {
            Value::Compound(c) => c,
            _ => bail!("text component did not project to a compound"),
        };
        Ok(mc_nbt::to_binary_unnamed(&compound, w)?)
    }
}

impl Decode<'_> for Text {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let value = mc_nbt::from_binary_unnamed_prefix(r)?
            .context("empty NBT payload where a text component was expected")?;
        Text::from_nbt(&value)
    }
}

/// Wraps a [`Text`] for the legacy JSON wire form used by login-phase
/// disconnect packets and legacy status responses.
pub struct LegacyJson<'a>(pub &'a Text);

impl Encode for LegacyJson<'_> {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        let s = serde_json::to_string(self.0).context("serializing text component as JSON")?;
        Bounded::<_, MAX_TEXT_CHARS>(s.as_str()).encode(w)
    }
}

/// Owned counterpart to [`LegacyJson`], used on the decode side.
pub struct LegacyJsonOwned(pub Text);

impl<'a> Decode<'a> for LegacyJsonOwned {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let s = Bounded::<&str, MAX_TEXT_CHARS>::decode(r)?.0;
        Ok(LegacyJsonOwned(
            serde_json::from_str(s).context("deserializing text component JSON")?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nbt_round_trips_nested_component() {
        let text = Text {
            text: Some("hi".into()),
            bold: Some(true),
            extra: vec![Text::plain("there")],
            ..Default::default()
        };

        let mut buf = Vec::new();
        text.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(Text::decode(&mut slice).unwrap(), text);
        assert!(slice.is_empty());
    }

    #[test]
    fn legacy_json_round_trips() {
        let text = Text::plain("disconnected");
        let mut buf = Vec::new();
        LegacyJson(&text).encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(LegacyJsonOwned::decode(&mut slice).unwrap().0, text);
    }
}
