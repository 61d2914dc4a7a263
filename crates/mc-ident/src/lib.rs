//! Resource identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Creates a new [`Ident`] at compile time from a string literal. A compile
/// error is not enforced here (unlike the macro-based approach some sibling
/// crates use) since the validation is cheap enough to do at runtime; this
/// just saves an `.unwrap()` at call sites.
#[macro_export]
macro_rules! ident {
    ($string:literal) => {
        $crate::Ident::new($string).expect("invalid resource identifier literal")
    };
}

/// Maximum length (in bytes) of an identifier once written to the wire.
pub const MAX_LEN: usize = 32767;

/// A namespaced identifier of the form `namespace:path`.
///
/// A leading `#` (the "tag" form used by block/item/entity-type tags) is
/// stripped during parsing and not retained; callers that need to know
/// whether a string was given in tag form should check before constructing
/// an `Ident`.
#[derive(Clone, Eq, Ord, Hash)]
pub struct Ident {
    string: String,
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Error)]
#[error("invalid resource identifier \"{0}\"")]
pub struct IdentError(pub String);

impl Ident {
    pub fn new(string: impl AsRef<str>) -> Result<Self, IdentError> {
        parse(string.as_ref())
    }

    pub fn as_str(&self) -> &str {
        &self.string
    }

    pub fn into_inner(self) -> String {
        self.string
    }

    /// The namespace part, before the colon.
    pub fn namespace(&self) -> &str {
        self.namespace_and_path().0
    }

    /// The path part, after the colon.
    pub fn path(&self) -> &str {
        self.namespace_and_path().1
    }

    pub fn namespace_and_path(&self) -> (&str, &str) {
        self.string
            .split_once(':')
            .expect("Ident invariant violated: no colon in stored string")
    }
}

fn check_namespace(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-'))
}

fn check_path(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-' | '/'))
}

fn parse(raw: &str) -> Result<Ident, IdentError> {
    let s = raw.strip_prefix('#').unwrap_or(raw);

    let full = match s.split_once(':') {
        Some((namespace, path)) if check_namespace(namespace) && check_path(path) => {
            s.to_owned()
        }
        None if check_path(s) => format!("minecraft:{s}"),
        _ => return Err(IdentError(raw.to_owned())),
    };

    if full.len() > MAX_LEN {
        return Err(IdentError(raw.to_owned()));
    }

    Ok(Ident { string: full })
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.string
    }
}

impl Borrow<str> for Ident {
    fn borrow(&self) -> &str {
        &self.string
    }
}

impl FromStr for Ident {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ident::new(s)
    }
}

impl TryFrom<String> for Ident {
    type Error = IdentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ident::new(&value)
    }
}

impl TryFrom<&str> for Ident {
    type Error = IdentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ident::new(value)
    }
}

impl From<Ident> for String {
    fn from(value: Ident) -> Self {
        value.string
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.string, f)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.string, f)
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
    }
}

impl PartialOrd for Ident {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.string.partial_cmp(&other.string)
    }
}

impl Serialize for Ident {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.string.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ident {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ident::new(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_namespace_and_path() {
        let id = Ident::new("namespace:path").unwrap();
        assert_eq!(id.namespace(), "namespace");
        assert_eq!(id.path(), "path");
    }

    #[test]
    fn parse_valid() {
        Ident::new("minecraft:whatever").unwrap();
        Ident::new("_what-ever55_:.whatever/whatever123456789_").unwrap();
        Ident::new("valence:frobnicator").unwrap();
    }

    #[test]
    fn parse_invalid() {
        assert!(Ident::new("").is_err());
        assert!(Ident::new(":").is_err());
        assert!(Ident::new("foo:bar:baz").is_err());
        assert!(Ident::new("minecr*ft:stone").is_err());
    }

    #[test]
    fn default_namespace() {
        let id = Ident::new("stone").unwrap();
        assert_eq!(id.namespace(), "minecraft");
        assert_eq!(id.path(), "stone");
    }

    #[test]
    fn tag_form_strips_hash() {
        let id = Ident::new("#dirt").unwrap();
        assert_eq!(id.namespace(), "minecraft");
        assert_eq!(id.path(), "dirt");
    }

    #[test]
    fn equality() {
        assert_eq!(
            Ident::new("minecraft:my.identifier").unwrap(),
            Ident::new("my.identifier").unwrap()
        );
        assert_eq!(
            Ident::new("#minecraft:foo").unwrap(),
            Ident::new("foo").unwrap()
        );
    }
}
