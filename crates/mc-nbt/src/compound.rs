use std::borrow::Borrow;

use indexmap::map::{Iter, IterMut};
use indexmap::IndexMap;

use crate::value::Value;

/// An ordered collection of named [`Value`]s.
///
/// Insertion order is preserved and reproduced on serialization, per the
/// protocol's requirement that a Compound's children are written in the
/// order they were inserted (vanilla chat-component and entity-data
/// payloads rely on this for round-tripping through third-party tools).
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Compound {
    map: IndexMap<String, Value>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            map: IndexMap::with_capacity(cap),
        }
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&Value>
    where
        String: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        self.map.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut Value>
    where
        String: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        self.map.get_mut(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        String: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Inserts a value, returning the previous value at this key (if any).
    /// Matches the wire-level behaviour of silently overwriting duplicate
    /// names encountered while parsing; schema-aware construction through
    /// [`crate::object::from_object`] is what actually rejects duplicates.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.map.insert(key.into(), value.into())
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<Value>
    where
        String: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        self.map.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.map.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, String, Value> {
        self.map.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.map.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.map.values()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl IntoIterator for Compound {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl FromIterator<(String, Value)> for Compound {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            map: IndexMap::from_iter(iter),
        }
    }
}

impl Extend<(String, Value)> for Compound {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.map.extend(iter)
    }
}

/// Constructs a [`Compound`] from `key: value` pairs, similar to a struct
/// literal.
#[macro_export]
macro_rules! compound {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut compound = $crate::Compound::new();
        $(
            compound.insert($key, $value);
        )*
        compound
    }};
}
